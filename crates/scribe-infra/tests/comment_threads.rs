#![cfg(feature = "auth")]

mod common;

use common::{Harness, comment_on, draft_for};
use scribe_core::DomainError;
use scribe_core::domain::Role;
use scribe_core::services::Registration;

#[tokio::test]
async fn test_comment_on_unpublished_post_rejected() {
    let h = Harness::new();
    let author = h.user("Ada", Role::Write).await;
    let post = h.draft(author.id).await;

    let err = h
        .comments
        .create_comment(comment_on(post.id, author.id, None), author.id)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::PostNotPublished));
}

#[tokio::test]
async fn test_only_post_author_may_comment() {
    let h = Harness::new();
    let author = h.user("Ada", Role::Write).await;
    let reader = h.user("Grace", Role::Write).await;
    let post = h.published(author.id).await;

    let err = h
        .comments
        .create_comment(comment_on(post.id, reader.id, None), reader.id)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::AuthorIsDifferent));
}

#[tokio::test]
async fn test_parent_from_other_post_rejected() {
    let h = Harness::new();
    let author = h.user("Ada", Role::Write).await;
    let first = h.published(author.id).await;
    let second = h.published(author.id).await;
    let parent = h
        .comments
        .create_comment(comment_on(first.id, author.id, None), author.id)
        .await
        .unwrap()
        .comment;

    let err = h
        .comments
        .create_comment(comment_on(second.id, author.id, Some(parent.id)), author.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ParentCommentNotBelongsToPost));

    let err = h
        .comments
        .create_comment(comment_on(second.id, author.id, Some(999)), author.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ParentCommentNotFound));
}

#[tokio::test]
async fn test_edit_comment_by_owner() {
    let h = Harness::new();
    let author = h.user("Ada", Role::Write).await;
    let post = h.published(author.id).await;
    let comment = h
        .comments
        .create_comment(comment_on(post.id, author.id, None), author.id)
        .await
        .unwrap()
        .comment;

    let edited = h
        .comments
        .edit_comment(comment.id, "Updated".into(), author.id, author.id)
        .await
        .unwrap();
    assert_eq!(edited.comment.content, "Updated");
    assert!(edited.comment.updated_at.is_some());
    assert_eq!(edited.author_name.as_deref(), Some("Ada"));

    let err = h
        .comments
        .edit_comment(comment.id, "Hijack".into(), author.id, author.id + 1)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorValidationFailed));

    let err = h
        .comments
        .edit_comment(404, "Missing".into(), author.id, author.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::CommentNotFound));
}

#[tokio::test]
async fn test_created_comment_carries_author_name() {
    let h = Harness::new();
    let author = h.user("Ada", Role::Write).await;
    let post = h.published(author.id).await;

    let created = h
        .comments
        .create_comment(comment_on(post.id, author.id, None), author.id)
        .await
        .unwrap();

    assert_eq!(created.author_name.as_deref(), Some("Ada"));
    assert_eq!(created.comment.author_id, author.id);
    assert!(created.replies.is_empty());
}

#[tokio::test]
async fn test_other_users_comment_cannot_be_changed() {
    let h = Harness::new();
    let author = h.user("Ada", Role::Write).await;
    let other = h.user("Grace", Role::Write).await;
    let post = h.published(author.id).await;
    let comment = h
        .comments
        .create_comment(comment_on(post.id, author.id, None), author.id)
        .await
        .unwrap()
        .comment;

    // Claim and token agree, but the comment belongs to someone else.
    let err = h
        .comments
        .edit_comment(comment.id, "Hijack".into(), other.id, other.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorIsDifferent));

    let err = h
        .comments
        .delete_comment(comment.id, other.id, other.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorIsDifferent));

    let thread = h.comments.comment_thread(comment.id).await.unwrap();
    assert_eq!(thread.comment.content, "Nice write-up");
    assert_eq!(h.store.comment_count().await, 1);
}

#[tokio::test]
async fn test_delete_comment_removes_all_replies() {
    let h = Harness::new();
    let author = h.user("Ada", Role::Write).await;
    let post = h.published(author.id).await;
    let root = h
        .comments
        .create_comment(comment_on(post.id, author.id, None), author.id)
        .await
        .unwrap()
        .comment;
    let reply = h
        .comments
        .create_comment(comment_on(post.id, author.id, Some(root.id)), author.id)
        .await
        .unwrap()
        .comment;
    h.comments
        .create_comment(comment_on(post.id, author.id, Some(reply.id)), author.id)
        .await
        .unwrap();
    h.comments
        .create_comment(comment_on(post.id, author.id, Some(root.id)), author.id)
        .await
        .unwrap();
    let unrelated = h
        .comments
        .create_comment(comment_on(post.id, author.id, None), author.id)
        .await
        .unwrap()
        .comment;

    let thread = h.comments.comment_thread(root.id).await.unwrap();
    assert_eq!(thread.size(), 4);
    assert_eq!(thread.author_name.as_deref(), Some("Ada"));

    let removed = h
        .comments
        .delete_comment(root.id, author.id, author.id)
        .await
        .unwrap();

    assert_eq!(removed, 4);
    assert_eq!(h.store.comment_count().await, 1);
    assert!(matches!(
        h.comments.comment_thread(root.id).await.unwrap_err(),
        DomainError::CommentNotFound
    ));
    assert!(matches!(
        h.comments.comment_thread(reply.id).await.unwrap_err(),
        DomainError::CommentNotFound
    ));
    assert!(h.comments.comment_thread(unrelated.id).await.is_ok());
}

#[tokio::test]
async fn test_admin_delete_comment_ignores_ownership() {
    let h = Harness::new();
    let author = h.user("Ada", Role::Write).await;
    let post = h.published(author.id).await;
    let root = h
        .comments
        .create_comment(comment_on(post.id, author.id, None), author.id)
        .await
        .unwrap()
        .comment;
    h.comments
        .create_comment(comment_on(post.id, author.id, Some(root.id)), author.id)
        .await
        .unwrap();

    assert_eq!(h.comments.admin_delete_comment(root.id).await.unwrap(), 2);
    assert!(matches!(
        h.comments.admin_delete_comment(root.id).await.unwrap_err(),
        DomainError::CommentNotFound
    ));
}

#[tokio::test]
async fn test_author_to_comment_walkthrough() {
    let h = Harness::new();
    let author = h
        .accounts
        .register(Registration {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "analytical-engine".into(),
            mobile_number: "0123456789".into(),
            role: Some(Role::Write),
            bio: None,
            avatar: None,
        })
        .await
        .unwrap();
    assert_eq!(author.id, 1);
    let other = h.user("Grace", Role::Write).await;
    assert_eq!(other.id, 2);

    let post = h
        .posts
        .create_post(draft_for(author.id), author.id)
        .await
        .unwrap();
    assert!(post.draft);

    let post = h
        .posts
        .publish_post(post.id, author.id, author.id)
        .await
        .unwrap();
    assert!(post.published);

    h.comments
        .create_comment(comment_on(post.id, author.id, None), author.id)
        .await
        .unwrap();

    let err = h
        .comments
        .create_comment(comment_on(post.id, other.id, None), other.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorIsDifferent));
}
