use dotenvy::dotenv;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use carecamp::router::init_router;
use carecamp::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Check if this is a CLI command
    if args.len() > 1 && args[1] == "grant-admin" {
        handle_grant_admin(args).await;
        return;
    }

    // Normal server startup
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = init_app_state().await;
    let app = init_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Failed to bind port");
    println!("CareCamp Server is running on port: {port}");
    println!("Swagger UI available at http://localhost:{port}/swagger-ui");
    axum::serve(listener, app).await.expect("Server error");
}

async fn handle_grant_admin(args: Vec<String>) {
    if args.len() != 3 {
        eprintln!("Usage: {} grant-admin <email>", args[0]);
        std::process::exit(1);
    }

    let email = &args[2];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match carecamp::cli::grant_admin(&pool, email).await {
        Ok(_) => {
            println!("Granted admin role to {email}");
        }
        Err(e) => {
            eprintln!("Error granting admin role: {e}");
            std::process::exit(1);
        }
    }
}
