//! Demo run: an admin sets up a store, a group opens, two coworkers order, the summary is printed
//! and the group is closed.

use chrono::{Duration, Utc};
use group_order::admin::{AdminConsole, StoreForm};
use group_order::auth::{hash_password, AdminAccount, AuthService};
use group_order::board::{GroupBoard, Subscriptions};
use group_order::clock::SystemClock;
use group_order::config::Config;
use group_order::lifecycle::{setup_tracing, Backend};
use group_order::storage::MemoryImageStore;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

const DEMO_PASSWORD: &str = "demo-password";

const DEMO_MENU: &str = "\
name,price,note
Fried Rice,90,no onion
Beef Noodles,120,
Wonton Soup,65.5,
Milk Tea,45,less sugar
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();

    let config = Config::from_env();
    info!(?config, "Starting group-order demo");

    let backend = Backend::start(config.table_buffer);

    let password_hash = match &config.admin_password_hash {
        Some(hash) => hash.clone(),
        None => {
            warn!("ADMIN_PASSWORD_HASH not set, using the demo password");
            hash_password(DEMO_PASSWORD)?
        }
    };
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEMO_PASSWORD.to_string());
    let auth = Arc::new(AuthService::new(vec![AdminAccount {
        email: config.admin_email.clone(),
        password_hash,
    }]));
    let images = Arc::new(MemoryImageStore::new(config.image_base_url.clone()));
    let admin = AdminConsole::new(&backend, auth.clone(), images);

    // Admin: store and menu
    let store_id = async {
        auth.sign_in(&config.admin_email, &password)?;
        let store_id = admin
            .save_store(StoreForm {
                name: "Golden Wok".to_string(),
                phone: Some("02-2345-6789".to_string()),
                image: None,
            })
            .await?;
        let imported = admin.import_menu(store_id, DEMO_MENU.as_bytes()).await?;
        info!(%store_id, imported, "Menu ready");
        auth.sign_out();
        Ok::<_, group_order::error::AppError>(store_id)
    }
    .instrument(tracing::info_span!("admin_setup"))
    .await?;

    // Ordering page
    let board = GroupBoard::new(&backend, Arc::new(SystemClock), &config);
    board.load().await?;
    let subscriptions = Subscriptions::start(board.clone(), config.tick_interval);

    let span = tracing::info_span!("ordering");
    async {
        board
            .create_group(
                store_id,
                Utc::now() + Duration::minutes(30),
                Some("Friday lunch".to_string()),
            )
            .await?;

        let menu = board.snapshot().await.menu;
        for (customer, pick, quantity) in [("Mei", 0, 2), ("Tom", 0, 1), ("Tom", 3, 1)] {
            if let Some(item) = menu.get(pick) {
                board
                    .create_order(&item.name, item.price, quantity, customer)
                    .await?;
            }
        }

        let state = board.snapshot().await;
        info!(countdown = %state.countdown, orders = state.orders.len(), "Board ready");
        println!("{}", board.summary_report().await?);
        println!("Share: {}", board.share_link().await?);

        board.close_group().await?;
        Ok::<_, group_order::error::AppError>(())
    }
    .instrument(span)
    .await?;

    subscriptions.stop().await;
    drop(board);
    drop(admin);
    backend.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
