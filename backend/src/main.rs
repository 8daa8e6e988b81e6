use std::sync::Arc;
use backend::{
    config::{AppConfig, StoreBackend},
    routes::AppState,
    store::{MemoryStore, PgStore, VoteStore},
};
use rocket::{routes, fs::NamedFile};
use shuttle_runtime::CustomError;
use sqlx::PgPool;
use tracing::{info, warn};
use include_dir::{include_dir, Dir};
use uuid::Uuid;

static STATIC_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

#[rocket::get("/<path..>", rank = 20)]
async fn spa_handler(path: std::path::PathBuf, temp_dir: &rocket::State<std::path::PathBuf>) -> Option<NamedFile> {
    let file_path = temp_dir.join(&path);
    if file_path.exists() && file_path.is_file() {
        NamedFile::open(&file_path).await.ok()
    } else {
        NamedFile::open(temp_dir.join("index.html")).await.ok()
    }
}

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secret_store: shuttle_runtime::SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    info!("🚀 Starting Red vs Blue server");

    let config = AppConfig::from_secrets(&secret_store);

    let store: Arc<dyn VoteStore> = match config.store {
        StoreBackend::Postgres => {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(CustomError::new)?;
            info!("📋 Migrations complete");
            Arc::new(PgStore::connect(pool).await)
        }
        StoreBackend::Memory => {
            warn!("STORE_BACKEND=memory - votes will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let temp_dir = std::env::temp_dir().join(format!("red_blue_static_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&temp_dir).map_err(CustomError::new)?;
    STATIC_DIR.extract(&temp_dir).map_err(CustomError::new)?;

    let rocket = backend::build(AppState::new(store, config))
        .manage(temp_dir)
        .mount("/", routes![spa_handler]);

    Ok(rocket.into())
}
