pub(crate) mod common;
mod dashboard;
