#[tokio::main]
async fn main() -> Result<(), tomiko_op::provider::Error> {
    tomiko_op::provider::main().await
}
