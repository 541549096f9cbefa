use async_trait::async_trait;
use table_actor::{ChangeKind, TableActor, TableError, TableRow, Upserted};

// --- Test Row ---

#[derive(Clone, Debug, PartialEq)]
struct Member {
    id: u32,
    team: String,
    name: String,
    active: bool,
}

#[derive(Debug)]
struct MemberCreate {
    team: String,
    name: String,
}

#[derive(Debug)]
enum MemberUpdate {
    Deactivate,
}

#[derive(Debug)]
enum MemberFilter {
    All,
    Team(String),
}

#[derive(Debug, thiserror::Error)]
#[error("Member already inactive")]
struct MemberError;

#[async_trait]
impl TableRow for Member {
    type Id = u32;
    type Create = MemberCreate;
    type Update = MemberUpdate;
    type Filter = MemberFilter;
    type Context = ();
    type Error = MemberError;

    fn from_create(id: u32, params: MemberCreate) -> Result<Self, MemberError> {
        Ok(Self {
            id,
            team: params.team,
            name: params.name,
            active: true,
        })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn matches(&self, filter: &MemberFilter) -> bool {
        match filter {
            MemberFilter::All => true,
            MemberFilter::Team(team) => &self.team == team,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn create_key(params: &MemberCreate) -> Option<String> {
        Some(params.name.clone())
    }

    async fn on_update(&mut self, update: MemberUpdate, _ctx: &()) -> Result<(), MemberError> {
        match update {
            MemberUpdate::Deactivate if !self.active => Err(MemberError),
            MemberUpdate::Deactivate => {
                self.active = false;
                Ok(())
            }
        }
    }
}

fn member(team: &str, name: &str) -> MemberCreate {
    MemberCreate {
        team: team.to_string(),
        name: name.to_string(),
    }
}

// --- Test ---

#[tokio::test]
async fn test_table_full_lifecycle() {
    let (actor, client) = TableActor::new(10);
    let handle = tokio::spawn(actor.run(()));

    // 1. Insert
    let id: u32 = client.insert(member("red", "Alice")).await.unwrap();
    assert_eq!(id, 1);

    // 2. Upsert on an existing key moves her to another team
    let outcome = client.upsert(member("blue", "Alice")).await.unwrap();
    assert_eq!(outcome, Upserted::Updated(1));
    let alice: Member = client.get(id).await.unwrap().unwrap();
    assert_eq!(alice.team, "blue");

    // 3. Update, then a second update that the row refuses
    let updated = client.update(id, MemberUpdate::Deactivate).await.unwrap();
    assert!(!updated.active);
    let err = client.update(id, MemberUpdate::Deactivate).await.unwrap_err();
    assert!(matches!(err, TableError::RowError(_)));
    assert_eq!(err.to_string(), "Member already inactive");

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(TableError::NotFound(_))
    ));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_select_is_filtered_and_ordered_by_id() {
    let (actor, client) = TableActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    for (team, name) in [("red", "Cy"), ("blue", "Bo"), ("red", "Al")] {
        client.insert(member(team, name)).await.unwrap();
    }

    let reds = client
        .select(MemberFilter::Team("red".to_string()))
        .await
        .unwrap();
    let ids: Vec<u32> = reds.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 3]);

    assert_eq!(client.select(MemberFilter::All).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_one_change_per_deleted_row() {
    let (actor, client) = TableActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    client.insert(member("red", "A")).await.unwrap();
    client.insert(member("red", "B")).await.unwrap();
    client.insert(member("blue", "C")).await.unwrap();

    let mut changes = client.subscribe();
    let removed = client
        .delete_where(MemberFilter::Team("red".to_string()))
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let first = changes.recv().await.unwrap();
    let second = changes.recv().await.unwrap();
    assert_eq!((first.kind, first.id), (ChangeKind::Deleted, 1));
    assert_eq!((second.kind, second.id), (ChangeKind::Deleted, 2));
    assert!(changes.try_recv().is_err());
}

#[tokio::test]
async fn test_closed_table_reports_closed() {
    let (actor, client) = TableActor::<Member>::new(10);
    drop(actor);

    assert!(matches!(
        client.get(1).await,
        Err(TableError::TableClosed)
    ));
}
