use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match newsapp_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("newsapp: {error}");
            ExitCode::FAILURE
        }
    }
}
