use async_trait::async_trait;
use chrono::{Duration, Utc};
use group_order::admin::{AdminConsole, ImageUpload, StoreForm};
use group_order::auth::{hash_password, AdminAccount, AuthService};
use group_order::error::AppError;
use group_order::lifecycle::Backend;
use group_order::model::{GroupCreate, OrderCreate};
use group_order::storage::{ImageStore, MemoryImageStore, StorageError};
use std::sync::Arc;
use table_actor::TableAccess;

const EMAIL: &str = "admin@example.com";
const PASSWORD: &str = "s3cret";

fn auth() -> Arc<AuthService> {
    Arc::new(AuthService::new(vec![AdminAccount {
        email: EMAIL.to_string(),
        password_hash: hash_password(PASSWORD).unwrap(),
    }]))
}

/// Image storage that accepts uploads but cannot remove anything.
struct StuckImageStore {
    inner: MemoryImageStore,
}

#[async_trait]
impl ImageStore for StuckImageStore {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        self.inner.upload(file_name, bytes).await
    }

    fn public_url(&self, path: &str) -> String {
        self.inner.public_url(path)
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        self.inner.path_from_url(url)
    }

    async fn remove(&self, _path: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("bucket unavailable".to_string()))
    }
}

fn form(name: &str) -> StoreForm {
    StoreForm {
        name: name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_console_requires_sign_in() {
    let backend = Backend::start(16);
    let auth = auth();
    let console = AdminConsole::new(
        &backend,
        auth.clone(),
        Arc::new(MemoryImageStore::new("http://img")),
    );

    assert_eq!(console.stores().await, Err(AppError::Unauthorized));
    assert_eq!(console.save_store(form("Golden Wok")).await, Err(AppError::Unauthorized));

    assert!(auth.sign_in(EMAIL, "wrong").is_err());
    assert_eq!(console.stores().await, Err(AppError::Unauthorized));

    auth.sign_in(EMAIL, PASSWORD).unwrap();
    assert_eq!(console.stores().await, Ok(vec![]));

    auth.sign_out();
    assert_eq!(console.stores().await, Err(AppError::Unauthorized));
    assert!(backend.stores.list_stores().await.unwrap().is_empty());

    drop(console);
    backend.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_saving_a_store_twice_keeps_its_id() {
    let backend = Backend::start(16);
    let auth = auth();
    let images = Arc::new(MemoryImageStore::new("http://img"));
    let console = AdminConsole::new(&backend, auth.clone(), images.clone());
    auth.sign_in(EMAIL, PASSWORD).unwrap();

    let first = console.save_store(form("Golden Wok")).await.unwrap();
    let second = console
        .save_store(StoreForm {
            name: " Golden Wok ".to_string(),
            phone: Some("02-1234".to_string()),
            image: Some(ImageUpload {
                file_name: "front.png".to_string(),
                bytes: vec![1, 2, 3],
            }),
        })
        .await
        .unwrap();
    assert_eq!(first, second);

    let stores = console.stores().await.unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].phone.as_deref(), Some("02-1234"));
    let url = stores[0].image_url.clone().unwrap();
    assert!(url.starts_with("http://img/"));
    assert_eq!(images.len().await, 1);
    let path = images.path_from_url(&url).unwrap();
    assert_eq!(images.get(&path).await.unwrap().content_type, "image/png");

    let err = console
        .save_store(StoreForm {
            image: Some(ImageUpload {
                file_name: "menu.pdf".to_string(),
                bytes: vec![1],
            }),
            ..form("Noodle Bar")
        })
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Storage(StorageError::NotAnImage("menu.pdf".to_string())));

    drop(console);
    backend.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reimport_updates_menu_in_place() {
    let backend = Backend::start(16);
    let auth = auth();
    let console = AdminConsole::new(
        &backend,
        auth.clone(),
        Arc::new(MemoryImageStore::new("http://img")),
    );
    auth.sign_in(EMAIL, PASSWORD).unwrap();
    let store_id = console.save_store(form("Golden Wok")).await.unwrap();

    let first = "Milk Tea,45,less sugar\nFried Rice,90,\n";
    assert_eq!(console.import_menu(store_id, first.as_bytes()).await, Ok(2));
    let before = console.menu(store_id).await.unwrap();

    let second = "name,price\nMilk Tea,50\nWonton Soup,65.5\n";
    assert_eq!(console.import_menu(store_id, second.as_bytes()).await, Ok(2));

    let menu = console.menu(store_id).await.unwrap();
    assert_eq!(menu.len(), 3);
    let tea = menu.iter().find(|p| p.name == "Milk Tea").unwrap();
    let old_tea = before.iter().find(|p| p.name == "Milk Tea").unwrap();
    assert_eq!(tea.id, old_tea.id);
    assert_eq!(tea.price, 50.0);
    assert_eq!(tea.description.as_deref(), Some("less sugar"));

    assert!(console.import_menu(store_id, "name,price\n".as_bytes()).await.is_err());

    let dup = console.add_menu_item(store_id, "Milk Tea", 40.0, None).await;
    assert!(matches!(dup, Err(AppError::Product(_))));
    assert!(matches!(
        console.add_menu_item(store_id, "Soda", -1.0, None).await,
        Err(AppError::Validation(_))
    ));

    let updated = console.update_price(tea.id, 55.0).await.unwrap();
    assert_eq!(updated.price, 55.0);
    console.delete_menu_item(tea.id).await.unwrap();
    assert_eq!(console.menu(store_id).await.unwrap().len(), 2);

    drop(console);
    backend.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_store_cascades_past_image_failure() {
    let backend = Backend::start(16);
    let auth = auth();
    let console = AdminConsole::new(
        &backend,
        auth.clone(),
        Arc::new(StuckImageStore {
            inner: MemoryImageStore::new("http://img"),
        }),
    );
    auth.sign_in(EMAIL, PASSWORD).unwrap();

    let store_id = console
        .save_store(StoreForm {
            image: Some(ImageUpload {
                file_name: "front.jpg".to_string(),
                bytes: vec![0xff, 0xd8],
            }),
            ..form("Golden Wok")
        })
        .await
        .unwrap();
    let kept_store = console.save_store(form("Noodle Bar")).await.unwrap();
    console
        .import_menu(store_id, "Milk Tea,45\nFried Rice,90\n".as_bytes())
        .await
        .unwrap();
    console
        .import_menu(kept_store, "Beef Noodles,120\n".as_bytes())
        .await
        .unwrap();

    let group_id = backend
        .groups
        .open_group(GroupCreate {
            store_id,
            order_date: Utc::now().date_naive(),
            end_time: Utc::now() + Duration::hours(1),
            name: None,
        })
        .await
        .unwrap();
    backend
        .orders
        .place_order(OrderCreate {
            group_id,
            item_name: "Milk Tea".to_string(),
            price: 45.0,
            quantity: 1,
            customer_name: "Mei".to_string(),
        })
        .await
        .unwrap();

    console.delete_store(store_id).await.unwrap();

    assert!(backend.stores.get(store_id).await.unwrap().is_none());
    assert!(backend.groups.get(group_id).await.unwrap().is_none());
    assert!(backend.orders.for_group(group_id).await.unwrap().is_empty());
    assert!(backend.products.menu(store_id).await.unwrap().is_empty());
    assert_eq!(backend.products.menu(kept_store).await.unwrap().len(), 1);

    assert!(matches!(
        console.delete_store(store_id).await,
        Err(AppError::Store(_))
    ));

    drop(console);
    backend.shutdown().await.unwrap();
}
