#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Build DATABASE_URL from the GUICHET_* variables when it is not set
    // directly, so the standalone migration binary and the server agree.
    if std::env::var("DATABASE_URL").is_err() {
        if let (Ok(user), Ok(password), Ok(host), Ok(port), Ok(name)) = (
            std::env::var("GUICHET_DATABASE_USER"),
            std::env::var("GUICHET_DATABASE_PASSWORD"),
            std::env::var("GUICHET_DATABASE_HOST"),
            std::env::var("GUICHET_DATABASE_PORT"),
            std::env::var("GUICHET_DATABASE_NAME"),
        ) {
            std::env::set_var(
                "DATABASE_URL",
                format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name),
            );
        }
    }

    sea_orm_migration::cli::run_cli(migration::Migrator).await;
}
