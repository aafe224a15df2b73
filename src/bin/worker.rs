use scribe::worker::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    dotenvy::dotenv().ok();
    scribe::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
