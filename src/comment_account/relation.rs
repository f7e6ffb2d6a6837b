//! # Relation Maintainer
//!
//! Keeps `Post::comment_count` equal to the number of live comments whose
//! `parent` is that post. Every function here runs inside the transaction of the
//! comment (or post) operation that called it, so the counter and the comment
//! records always commit together.

use crate::model::{Comment, Post};
use ledger_framework::{Address, LedgerError, Transaction};
use tracing::debug;

fn adjust(
    parent: &Address,
    tx: &mut Transaction<'_>,
    step: fn(u32) -> Option<u32>,
) -> Result<u32, LedgerError> {
    let mut post = tx.load::<Post>(parent)?;
    post.comment_count = step(post.comment_count).ok_or_else(|| {
        LedgerError::InvariantViolation(format!(
            "comment_count of {parent} would leave u32 range from {}",
            post.comment_count
        ))
    })?;
    tx.store(parent, &post)?;
    Ok(post.comment_count)
}

/// Counts a new comment on `parent`. Fails with `NotFound` if the post is gone.
pub fn attach(parent: &Address, tx: &mut Transaction<'_>) -> Result<(), LedgerError> {
    let count = adjust(parent, tx, |n| n.checked_add(1))?;
    debug!(%parent, count, "Comment attached");
    Ok(())
}

/// Uncounts a deleted comment. A counter already at zero is an invariant violation.
pub fn detach(parent: &Address, tx: &mut Transaction<'_>) -> Result<(), LedgerError> {
    let count = adjust(parent, tx, |n| n.checked_sub(1))?;
    debug!(%parent, count, "Comment detached");
    Ok(())
}

/// Closes every comment on the post at `post`, which must number `expected`.
///
/// Decodes every comment in the store to find the thread.
pub fn close_thread(
    post: &Address,
    expected: u32,
    tx: &mut Transaction<'_>,
) -> Result<(), LedgerError> {
    let thread: Vec<Address> = tx
        .scan::<Comment>()?
        .into_iter()
        .filter(|(_, comment)| comment.parent == *post)
        .map(|(address, _)| address)
        .collect();

    if thread.len() != expected as usize {
        return Err(LedgerError::InvariantViolation(format!(
            "post {post} counts {expected} comments but {} exist",
            thread.len()
        )));
    }
    for address in &thread {
        tx.close(address)?;
    }
    debug!(%post, closed = thread.len(), "Thread closed");
    Ok(())
}
