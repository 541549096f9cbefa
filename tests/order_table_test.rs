use group_order::clients::GroupClient;
use group_order::model::{Group, GroupId, OrderCreate, StoreId};
use group_order::order_table::OrderError;
use chrono::{NaiveDate, TimeZone, Utc};
use table_actor::mock::MockTable;
use table_actor::TableAccess;

fn group(id: u32) -> Group {
    Group {
        id: GroupId(id),
        store_id: StoreId(1),
        order_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        end_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        name: None,
    }
}

fn order_in(group_id: GroupId) -> OrderCreate {
    OrderCreate {
        group_id,
        item_name: "Fried Rice".to_string(),
        price: 90.0,
        quantity: 1,
        customer_name: "Mei".to_string(),
    }
}

/// Real orders table with a mocked groups table.
/// This tests the group check in `Order::on_create` in isolation.
#[tokio::test]
async fn test_order_table_with_mocked_groups() {
    let mut group_mock = MockTable::<Group>::new();

    // Order::on_create looks the group up once per insert
    group_mock.expect_get(GroupId(1)).return_ok(Some(group(1)));
    group_mock.expect_get(GroupId(2)).return_ok(None);

    let group_client = GroupClient::new(group_mock.client());
    let (order_actor, order_client) = group_order::order_table::new(10);
    let actor_handle = tokio::spawn(order_actor.run(group_client));

    let order_id = order_client
        .place_order(order_in(GroupId(1)))
        .await
        .expect("Order in an existing group");
    let stored = order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(stored.customer_name, "Mei");
    assert_eq!(stored.group_id, GroupId(1));

    let err = order_client
        .place_order(order_in(GroupId(2)))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::MissingGroup("group_2".to_string()));
    assert_eq!(order_client.for_group(GroupId(2)).await.unwrap().len(), 0);

    group_mock.verify();

    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_blank_customer_name_never_reaches_groups() {
    // No expectations: a group lookup would fail verification
    let group_mock = MockTable::<Group>::new();
    let (order_actor, order_client) = group_order::order_table::new(10);
    tokio::spawn(order_actor.run(GroupClient::new(group_mock.client())));

    let mut params = order_in(GroupId(1));
    params.customer_name = "   ".to_string();
    let err = order_client.place_order(params).await.unwrap_err();
    assert!(matches!(err, OrderError::ValidationError(_)));

    group_mock.verify();
}
