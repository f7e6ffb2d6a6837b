use ledger_framework::codec::{RecordReader, RecordWriter};
use ledger_framework::{
    AccountEntity, ActorClient, Address, Identity, Keypair, LedgerActor, LedgerError, ManualClock,
    Namespace, RecordId, ResourceClient, Transaction,
};
use std::sync::Arc;

// --- Minimal parent/child record kinds for the test ---

const LABEL_BUDGET: usize = 32;

#[derive(Clone, Debug, PartialEq)]
struct Tally {
    owner: Identity,
    id: RecordId,
    label: String,
    votes: u32,
}

impl AccountEntity for Tally {
    const ACCOUNT_NAME: &'static str = "Tally";
    const NAMESPACE: Namespace = Namespace::new("tally");
    const SPACE: usize = 8 + 32 + 32 + 4 + 4 + LABEL_BUDGET;

    type Create = String;
    type Update = String;

    fn owner(&self) -> &Identity {
        &self.owner
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn scope(&self) -> Address {
        self.owner.as_address()
    }

    fn scope_for(actor: &Identity, _: &String) -> Address {
        actor.as_address()
    }

    fn from_create_params(
        owner: Identity,
        id: RecordId,
        label: String,
        _now: i64,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            owner,
            id,
            label,
            votes: 0,
        })
    }

    fn on_update(&mut self, label: String, _now: i64) -> Result<(), LedgerError> {
        self.label = label;
        Ok(())
    }

    fn encode(&self, writer: &mut RecordWriter) -> Result<(), LedgerError> {
        writer.put_identity(&self.owner);
        writer.put_record_id(&self.id);
        writer.put_u32(self.votes);
        writer.put_str("label", &self.label, LABEL_BUDGET)
    }

    fn decode(reader: &mut RecordReader<'_>) -> Result<Self, LedgerError> {
        Ok(Self {
            owner: reader.get_identity()?,
            id: reader.get_record_id()?,
            votes: reader.get_u32()?,
            label: reader.get_str("label", LABEL_BUDGET)?,
        })
    }
}

#[derive(Clone, Debug)]
struct Vote {
    owner: Identity,
    tally: Address,
    id: RecordId,
}

impl Vote {
    fn adjust(tally: &Address, tx: &mut Transaction<'_>, up: bool) -> Result<(), LedgerError> {
        let mut parent = tx.load::<Tally>(tally)?;
        parent.votes = if up {
            parent.votes.checked_add(1)
        } else {
            parent.votes.checked_sub(1)
        }
        .ok_or_else(|| LedgerError::InvariantViolation("vote count out of range".into()))?;
        tx.store(tally, &parent)
    }
}

impl AccountEntity for Vote {
    const ACCOUNT_NAME: &'static str = "Vote";
    const NAMESPACE: Namespace = Namespace::new("vote");
    const SPACE: usize = 8 + 32 + 32 + 32;

    type Create = Address;
    type Update = ();

    fn owner(&self) -> &Identity {
        &self.owner
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn scope(&self) -> Address {
        self.tally
    }

    fn scope_for(_: &Identity, tally: &Address) -> Address {
        *tally
    }

    fn from_create_params(
        owner: Identity,
        id: RecordId,
        tally: Address,
        _now: i64,
    ) -> Result<Self, LedgerError> {
        Ok(Self { owner, tally, id })
    }

    fn on_create(&mut self, _: &Address, tx: &mut Transaction<'_>) -> Result<(), LedgerError> {
        Vote::adjust(&self.tally, tx, true)
    }

    fn on_update(&mut self, _: (), _now: i64) -> Result<(), LedgerError> {
        Ok(())
    }

    fn on_delete(&self, _: &Address, tx: &mut Transaction<'_>) -> Result<(), LedgerError> {
        Vote::adjust(&self.tally, tx, false)
    }

    fn encode(&self, writer: &mut RecordWriter) -> Result<(), LedgerError> {
        writer.put_identity(&self.owner);
        writer.put_address(&self.tally);
        writer.put_record_id(&self.id);
        Ok(())
    }

    fn decode(reader: &mut RecordReader<'_>) -> Result<Self, LedgerError> {
        Ok(Self {
            owner: reader.get_identity()?,
            tally: reader.get_address()?,
            id: reader.get_record_id()?,
        })
    }
}

struct TallyClient {
    inner: ResourceClient<Tally>,
}

impl ActorClient<Tally> for TallyClient {
    type Error = LedgerError;

    fn inner(&self) -> &ResourceClient<Tally> {
        &self.inner
    }
}

fn start() -> (ResourceClient<Tally>, ResourceClient<Vote>) {
    let program_id = Address::new_from_array([7; 32]);
    let clock = Arc::new(ManualClock::new(1_700_000_000));
    let (actor, connection) = LedgerActor::new(16, program_id, clock);
    tokio::spawn(actor.run());
    (connection.client(), connection.client())
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (tallies, votes) = start();
    let owner = Keypair::generate().identity();
    let voter = Keypair::generate().identity();

    // 1. Create
    let tally_address = tallies.create(owner, RecordId::from(1), "lunch".into()).await.unwrap();
    assert_eq!(
        tally_address,
        tallies.address_of(&owner.as_address(), &RecordId::from(1)).unwrap()
    );

    // 2. Child create runs the parent hook in the same operation
    let vote_address = votes.create(voter, RecordId::from(1), tally_address).await.unwrap();
    assert_eq!(tallies.get(tally_address).await.unwrap().votes, 1);

    // 3. Update
    let updated = tallies.update(owner, tally_address, "dinner".into()).await.unwrap();
    assert_eq!(updated.label, "dinner");
    assert_eq!(updated.votes, 1);

    // 4. Delete child, then parent
    votes.delete(voter, vote_address).await.unwrap();
    assert_eq!(tallies.get(tally_address).await.unwrap().votes, 0);
    tallies.delete(owner, tally_address).await.unwrap();
    assert_eq!(
        tallies.get(tally_address).await.unwrap_err(),
        LedgerError::NotFound(tally_address)
    );
}

#[tokio::test]
async fn test_failed_hook_rolls_back_the_child() {
    let (tallies, votes) = start();
    let voter = Keypair::generate().identity();
    let missing = tallies
        .address_of(&voter.as_address(), &RecordId::from(99))
        .unwrap();

    let err = votes.create(voter, RecordId::from(1), missing).await.unwrap_err();
    assert_eq!(err, LedgerError::NotFound(missing));
    assert!(votes.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_children_are_all_counted() {
    let (tallies, votes) = start();
    let owner = Keypair::generate().identity();
    let tally_address = tallies.create(owner, RecordId::from(1), "poll".into()).await.unwrap();

    let handles: Vec<_> = (0..20u64)
        .map(|n| {
            let votes = votes.clone();
            tokio::spawn(async move {
                let voter = Keypair::generate().identity();
                votes.create(voter, RecordId::from(n), tally_address).await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(tallies.get(tally_address).await.unwrap().votes, 20);
    assert_eq!(votes.list(Some(tally_address)).await.unwrap().len(), 20);
}

#[tokio::test]
async fn test_wrong_kind_at_address_is_not_found() {
    let (tallies, votes) = start();
    let owner = Keypair::generate().identity();
    let tally_address = tallies.create(owner, RecordId::from(1), "t".into()).await.unwrap();

    let err = votes.get(tally_address).await.unwrap_err();
    assert_eq!(err, LedgerError::NotFound(tally_address));
}

#[tokio::test]
async fn test_actor_client_defaults() {
    let (tallies, _) = start();
    let client = TallyClient { inner: tallies };
    let owner = Keypair::generate().identity();
    let address = client.inner().create(owner, RecordId::from(3), "x".into()).await.unwrap();

    assert_eq!(client.get(address).await.unwrap().label, "x");
    assert_eq!(client.list(Some(owner.as_address())).await.unwrap().len(), 1);
    client.delete(owner, address).await.unwrap();
    assert!(client.list(None).await.unwrap().is_empty());
}
