#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quizwall_backend::run().await
}
