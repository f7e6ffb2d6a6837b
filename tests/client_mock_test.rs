use blog_ledger::clients::{CommentClient, PostClient};
use blog_ledger::error::BlogError;
use blog_ledger::model::{Comment, Post, PostCreate, PostUpdate};
use ledger_framework::mock::MockClient;
use ledger_framework::{ActorClient, Address, Keypair, LedgerError, RecordId};

/// Client logic test: no actor, only expectations.
#[tokio::test]
async fn test_post_client_maps_ledger_errors() {
    let author = Keypair::generate().identity();
    let address = Address::new_from_array([4; 32]);
    let mut mock = MockClient::<Post>::new();
    mock.expect_create().return_ok(address);
    mock.expect_update(address).return_err(LedgerError::Unauthorized {
        actor: author,
        address,
        reason: "actor is not the owner",
    });
    mock.expect_delete(address).return_err(LedgerError::ActorClosed);

    let client = PostClient::new(mock.client());
    let created = client
        .create_post(author, RecordId::from(1), PostCreate::new("t", "c"))
        .await
        .unwrap();
    assert_eq!(created, address);

    let err = client
        .update_post(author, address, PostUpdate::title("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, BlogError::Ledger(LedgerError::Unauthorized { .. })));

    let err = client.delete_post(author, address).await.unwrap_err();
    assert_eq!(err, BlogError::Ledger(LedgerError::ActorClosed));

    mock.verify();
}

#[tokio::test]
async fn test_posts_by_lists_the_owner_scope() {
    let author = Keypair::generate().identity();
    let post = Post {
        owner: author,
        id: RecordId::from(1),
        title: "t".into(),
        content: "c".into(),
        comment_count: 2,
        created_at: 10,
        updated_at: 10,
    };
    let address = Address::new_from_array([6; 32]);
    let mut mock = MockClient::<Post>::new();
    mock.expect_list(Some(author.as_address()))
        .return_ok(vec![(address, post.clone())]);
    mock.expect_get(address).return_ok(post.clone());

    let client = PostClient::new(mock.client());
    assert_eq!(client.posts_by(author).await.unwrap(), vec![(address, post.clone())]);
    assert_eq!(client.get(address).await.unwrap(), post);
    mock.verify();
}

#[tokio::test]
async fn test_comment_client_addresses_match_the_mock_program() {
    let program_id = Address::new_from_array([8; 32]);
    let mut mock = MockClient::<Comment>::with_program_id(program_id);
    let post = Address::new_from_array([2; 32]);
    let client = CommentClient::new(mock.client());
    let expected = client.comment_address(&post, &RecordId::from(1)).unwrap();
    mock.expect_create().return_ok(expected);

    let address = client
        .add_comment(Keypair::generate().identity(), post, RecordId::from(1), "hi".into())
        .await
        .unwrap();
    assert_eq!(address, expected);
    mock.verify();
}
