/// Database access layer
///
/// Free functions over `&PgPool`, one module per table. Read views are
/// assembled in SQL: owner profiles come from a correlated sub-select that
/// yields `NULL` when the referenced user is gone.
pub mod comment_repo;
pub mod dashboard_repo;
pub mod like_repo;
pub mod playlist_repo;
pub mod subscription_repo;
pub mod tweet_repo;
pub mod user_repo;
pub mod video_repo;

/// SQL expression producing the `OwnerProfile` JSON for the user id in
/// `column`.
pub(crate) fn owner_profile_json(column: &str) -> String {
    format!(
        "(SELECT json_build_object('id', u.id, 'username', u.username, \
         'fullName', u.full_name, 'avatar', u.avatar) \
         FROM users u WHERE u.id = {column})"
    )
}

/// SQL expression counting likes of `kind` on the id in `column`.
pub(crate) fn likes_count(kind: &str, column: &str) -> String {
    format!(
        "(SELECT COUNT(*) FROM likes l \
         WHERE l.target_kind = '{kind}' AND l.target_id = {column})"
    )
}
