//! # Authorization Guard
//!
//! Only the recorded owner may mutate a record, and only through the address the
//! record actually derives to. Both checks are needed: comparing owners alone
//! would accept a record planted at an address its seeds do not produce.

use crate::address::{derive_address, Address, Identity};
use crate::entity::{entity_type, AccountEntity};
use crate::error::LedgerError;
use tracing::warn;

/// Checks that `actor` owns `record` and that `address` re-derives from it.
pub fn authorize<T: AccountEntity>(
    program_id: &Address,
    address: &Address,
    record: &T,
    actor: &Identity,
) -> Result<(), LedgerError> {
    let derived = derive_address(program_id, T::NAMESPACE, &record.scope(), record.id())?;
    if derived.address != *address {
        warn!(entity_type = entity_type::<T>(), %address, %actor, "Seeds constraint violated");
        return Err(LedgerError::Unauthorized {
            actor: *actor,
            address: *address,
            reason: "address does not derive from record seeds",
        });
    }
    if record.owner() != actor {
        warn!(entity_type = entity_type::<T>(), %address, %actor, "Owner mismatch");
        return Err(LedgerError::Unauthorized {
            actor: *actor,
            address: *address,
            reason: "actor is not the owner",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Keypair;
    use crate::testing::{note_address, Note};

    #[test]
    fn test_owner_at_derived_address_is_authorized() {
        let owner = Keypair::generate().identity();
        let note = Note::new(owner, 1, "mine");
        assert_eq!(authorize(&Address::default(), &note_address(&note), &note, &owner), Ok(()));
    }

    #[test]
    fn test_other_actor_is_rejected() {
        let owner = Keypair::generate().identity();
        let intruder = Keypair::generate().identity();
        let note = Note::new(owner, 1, "mine");
        let address = note_address(&note);
        let err = authorize(&Address::default(), &address, &note, &intruder).unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized { reason: "actor is not the owner", .. }));
    }

    #[test]
    fn test_record_at_foreign_address_is_rejected() {
        let owner = Keypair::generate().identity();
        let note = Note::new(owner, 1, "mine");
        let elsewhere = note_address(&Note::new(owner, 2, "other"));
        let err = authorize(&Address::default(), &elsewhere, &note, &owner).unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized { .. }));
    }

    #[test]
    fn test_program_id_is_part_of_the_check() {
        let owner = Keypair::generate().identity();
        let note = Note::new(owner, 1, "mine");
        let other_program = Address::new_from_array([1; 32]);
        assert!(authorize(&other_program, &note_address(&note), &note, &owner).is_err());
    }
}
