#[tokio::main]
async fn main() {
    if let Err(err) = bear_xcall::cli::run().await {
        eprintln!("bear: {}", err);
        if let Some(hint) = err.hint.as_deref() {
            eprintln!("hint: {}", hint);
        }
        std::process::exit(1);
    }
}
