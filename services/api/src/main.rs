use kai_profile_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("kai-profile error: {err}");
        std::process::exit(1);
    }
}
