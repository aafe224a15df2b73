pub use scribe::api::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // Local runs pick up a .env file; in Lambda the environment is already set
    dotenvy::dotenv().ok();
    scribe::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
