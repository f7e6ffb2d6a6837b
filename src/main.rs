use blog_ledger::config::LedgerConfig;
use blog_ledger::error::BlogError;
use blog_ledger::lifecycle::{setup_tracing, BlogSystem};
use blog_ledger::model::{PostCreate, PostUpdate};
use ledger_framework::{ActorClient, Keypair, RecordId};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), BlogError> {
    setup_tracing();

    let config = LedgerConfig::from_env()?;
    info!(program_id = %config.program_id, "Starting blog ledger");
    let system = BlogSystem::new(config);

    let author = Keypair::generate().identity();

    let span = tracing::info_span!("post_lifecycle");
    let post = async {
        let post = system
            .post_client
            .create_post(
                author,
                RecordId::random(),
                PostCreate::new("My First Post", "This is the content of my first post."),
            )
            .await?;
        let created = system.post_client.get(post).await?;
        info!(%post, comment_count = created.comment_count, "Post created");

        let updated = system
            .post_client
            .update_post(author, post, PostUpdate::title("My Updated Post"))
            .await?;
        info!(title = %updated.title, updated_at = updated.updated_at, "Post updated");
        Ok::<_, BlogError>(post)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("comment_lifecycle");
    async {
        let comment = system
            .comment_client
            .add_comment(author, post, RecordId::random(), "Great post!".to_string())
            .await?;
        let count = system.post_client.get(post).await?.comment_count;
        info!(%comment, comment_count = count, "Comment added");

        system.comment_client.delete_comment(author, comment).await?;
        let count = system.post_client.get(post).await?.comment_count;
        info!(comment_count = count, "Comment deleted");

        match system.comment_client.get(comment).await {
            Err(e) => info!(error = %e, "Deleted comment is gone"),
            Ok(_) => warn!("Deleted comment is still readable"),
        }
        Ok::<_, BlogError>(())
    }
    .instrument(span)
    .await?;

    system.post_client.delete_post(author, post).await?;
    if let Err(e) = system.post_client.get(post).await {
        info!(error = %e, "Deleted post is gone");
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
