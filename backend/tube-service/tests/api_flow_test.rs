//! End-to-end flows against a real PostgreSQL.
//!
//! Coverage:
//! - Ownership: non-owners get 403 (videos, tweets) or a masked 404
//!   (comments, playlists)
//! - Toggles alternate between created and removed, also when racing
//! - Pagination of the public video list
//! - Playlists keep each video once
//! - Deleting a video leaves its comments and likes behind
//! - Unpublished videos are hidden from everyone but the owner
//! - An update with nothing to change returns the stored video
//!
//! Architecture:
//! - Uses testcontainers for PostgreSQL
//! - Media uploads go to an in-process fake

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{bearer, fake_uploader, insert_user, insert_video, multipart_body, send, setup_test_db};
use futures_util::future::join_all;
use serde_json::{json, Value};
use tube_service::models::LikeTarget;
use tube_service::services::{LikeService, SubscriptionService};
use uuid::Uuid;

fn id_of(body: &Value) -> String {
    body["data"]["id"].as_str().expect("id in data").to_string()
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn tweet_lifecycle_enforces_ownership() {
    let pool = setup_test_db().await.expect("test db");
    let alice = insert_user(&pool, "alice").await;
    let bob = insert_user(&pool, "bob").await;
    let app = tube_app!(pool.clone(), fake_uploader());

    let req = test::TestRequest::post()
        .uri("/api/v1/tweets")
        .insert_header(("Authorization", bearer(alice)))
        .set_json(json!({"content": "hello"}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Tweet created successfully");
    assert_eq!(body["data"]["owner"], alice.to_string());
    assert_eq!(body["data"]["content"], "hello");
    let tweet_id = id_of(&body);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/tweets/{tweet_id}"))
        .insert_header(("Authorization", bearer(bob)))
        .set_json(json!({"content": "hijacked"}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Unauthorized to update this tweet");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tweets/user/{alice}"))
        .insert_header(("Authorization", bearer(bob)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["content"], "hello");
    assert_eq!(body["data"][0]["owner"]["username"], "alice");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tweets/{tweet_id}"))
        .insert_header(("Authorization", bearer(alice)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tweets/user/{alice}"))
        .insert_header(("Authorization", bearer(alice)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No tweets found for this user");
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn liking_twice_leaves_no_like() {
    let pool = setup_test_db().await.expect("test db");
    let owner = insert_user(&pool, "owner").await;
    let fan = insert_user(&pool, "fan").await;
    let video_id = insert_video(&pool, owner, "Clip", true).await;
    let app = tube_app!(pool.clone(), fake_uploader());

    let uri = format!("/api/v1/likes/toggle/v/{video_id}");

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(("Authorization", bearer(fan)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Video liked successfully");
    assert_eq!(body["data"]["likedBy"], fan.to_string());

    let req = test::TestRequest::get()
        .uri("/api/v1/likes/videos")
        .insert_header(("Authorization", bearer(fan)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalVideos"], 1);
    assert_eq!(body["data"]["videos"][0]["owner"]["username"], "owner");

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(("Authorization", bearer(fan)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Video unliked successfully");
    assert!(body["data"].is_null());

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE target_id = $1")
        .bind(video_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/likes/toggle/c/{}", Uuid::new_v4()))
        .insert_header(("Authorization", bearer(fan)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Comment not found");
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn second_page_of_fifteen_videos() {
    let pool = setup_test_db().await.expect("test db");
    let owner = insert_user(&pool, "creator").await;
    for i in 0..15 {
        insert_video(&pool, owner, &format!("Video {i:02}"), true).await;
    }
    insert_video(&pool, owner, "Hidden draft", false).await;
    let app = tube_app!(pool.clone(), fake_uploader());

    let req = test::TestRequest::get()
        .uri("/api/v1/videos?page=2&limit=10&sortBy=title&sortType=asc")
        .insert_header(("Authorization", bearer(owner)))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    let page = &body["data"];
    assert_eq!(page["docs"].as_array().unwrap().len(), 5);
    assert_eq!(page["totalDocs"], 15);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["hasNextPage"], false);
    assert_eq!(page["hasPrevPage"], true);
    assert_eq!(page["docs"][0]["title"], "Video 10");
    assert_eq!(page["docs"][0]["owner"]["username"], "creator");

    let req = test::TestRequest::get()
        .uri("/api/v1/videos?query=video%2005")
        .insert_header(("Authorization", bearer(owner)))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["data"]["totalDocs"], 1);
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn playlist_keeps_each_video_once() {
    let pool = setup_test_db().await.expect("test db");
    let curator = insert_user(&pool, "curator").await;
    let stranger = insert_user(&pool, "stranger").await;
    let video_id = insert_video(&pool, stranger, "Track", true).await;
    let app = tube_app!(pool.clone(), fake_uploader());

    let req = test::TestRequest::post()
        .uri("/api/v1/playlist")
        .insert_header(("Authorization", bearer(curator)))
        .set_json(json!({"name": "Mix", "description": "Weekend"}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let playlist_id = id_of(&body);

    for _ in 0..2 {
        let req = test::TestRequest::patch()
            .uri(&format!("/api/v1/playlist/add/{video_id}/{playlist_id}"))
            .insert_header(("Authorization", bearer(curator)))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["videos"], json!([video_id.to_string()]));
    }

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/playlist/add/{video_id}/{playlist_id}"))
        .insert_header(("Authorization", bearer(stranger)))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/playlist/{playlist_id}"))
        .insert_header(("Authorization", bearer(stranger)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalVideos"], 1);
    assert_eq!(body["data"]["videos"][0]["owner"]["username"], "stranger");
    assert_eq!(body["data"]["owner"]["username"], "curator");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/playlist/remove/{video_id}/{playlist_id}"))
        .insert_header(("Authorization", bearer(curator)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["videos"], json!([]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/playlist/{playlist_id}"))
        .insert_header(("Authorization", bearer(stranger)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "Playlist not found or you do not have permission to delete it"
    );
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn deleting_a_video_leaves_comments_and_likes() {
    let pool = setup_test_db().await.expect("test db");
    let owner = insert_user(&pool, "uploader").await;
    let viewer = insert_user(&pool, "viewer").await;
    let video_id = insert_video(&pool, owner, "Short", true).await;
    let app = tube_app!(pool.clone(), fake_uploader());

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/comments/{video_id}"))
        .insert_header(("Authorization", bearer(viewer)))
        .set_json(json!({"content": "nice"}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let comment_id = id_of(&body);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/likes/toggle/c/{comment_id}"))
        .insert_header(("Authorization", bearer(viewer)))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/videos/{video_id}"))
        .insert_header(("Authorization", bearer(viewer)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You are not the owner of this video");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/videos/{video_id}"))
        .insert_header(("Authorization", bearer(owner)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({}));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/comments/{video_id}"))
        .insert_header(("Authorization", bearer(viewer)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalComments"], 1);
    assert_eq!(body["data"]["comments"][0]["likesCount"], 1);
    assert_eq!(body["data"]["comments"][0]["isLikedByMe"], true);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/comments/c/{comment_id}"))
        .insert_header(("Authorization", bearer(owner)))
        .set_json(json!({"content": "edited"}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "Comment not found or you're not allowed to edit this comment"
    );
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn unpublished_videos_are_visible_to_owner_only() {
    let pool = setup_test_db().await.expect("test db");
    let owner = insert_user(&pool, "maker").await;
    let viewer = insert_user(&pool, "watcher").await;
    let uploader = fake_uploader();
    let app = tube_app!(pool.clone(), uploader.clone());

    let (content_type, payload) = multipart_body(&[
        ("title", None, "Launch"),
        ("description", None, "Day one"),
        ("videoFile", Some("launch.mp4"), "video-bytes"),
        ("thumbnail", Some("launch.png"), "image-bytes"),
    ]);
    let req = test::TestRequest::post()
        .uri("/api/v1/videos")
        .insert_header(("Authorization", bearer(owner)))
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["videoFile"], "https://media.test/launch.mp4");
    assert_eq!(body["data"]["duration"], 12);
    assert_eq!(uploader.calls(), 2);
    let video_id = id_of(&body);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/videos/toggle/publish/{video_id}"))
        .insert_header(("Authorization", bearer(owner)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Video is now Unpublished");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/videos/{video_id}"))
        .insert_header(("Authorization", bearer(viewer)))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/videos/{video_id}"))
        .insert_header(("Authorization", bearer(owner)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["views"], 0);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/videos/toggle/publish/{video_id}"))
        .insert_header(("Authorization", bearer(viewer)))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (content_type, payload) = multipart_body(&[("title", None, "  ")]);
    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/videos/{video_id}"))
        .insert_header(("Authorization", bearer(viewer)))
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (content_type, payload) = multipart_body(&[("title", None, "  ")]);
    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/videos/{video_id}"))
        .insert_header(("Authorization", bearer(owner)))
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Launch");
    assert_eq!(body["data"]["description"], "Day one");
    assert_eq!(uploader.calls(), 2);

    sqlx::query("UPDATE videos SET is_published = TRUE WHERE id = $1")
        .bind(Uuid::parse_str(&video_id).unwrap())
        .execute(&pool)
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/videos/{video_id}"))
        .insert_header(("Authorization", bearer(viewer)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["views"], 1);
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn subscriptions_and_dashboard() {
    let pool = setup_test_db().await.expect("test db");
    let channel = insert_user(&pool, "channel").await;
    let follower = insert_user(&pool, "follower").await;
    let video_id = insert_video(&pool, channel, "Episode", true).await;
    let app = tube_app!(pool.clone(), fake_uploader());

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/subscriptions/c/{channel}"))
        .insert_header(("Authorization", bearer(follower)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["channel"], channel.to_string());

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/likes/toggle/v/{video_id}"))
        .insert_header(("Authorization", bearer(follower)))
        .to_request();
    send(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/subscriptions/c/{channel}"))
        .insert_header(("Authorization", bearer(channel)))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["data"]["subscribersCount"], 1);
    assert_eq!(body["data"]["subscribers"][0]["subscriber"]["username"], "follower");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/subscriptions/u/{follower}"))
        .insert_header(("Authorization", bearer(follower)))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["data"]["channelsCount"], 1);
    assert_eq!(body["data"]["channels"][0]["subscribersCount"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard/stats")
        .insert_header(("Authorization", bearer(channel)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"totalViews": 0, "totalVideos": 1, "totalSubscribers": 1, "totalLikes": 1})
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/subscriptions/c/{channel}"))
        .insert_header(("Authorization", bearer(follower)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Unsubscribed successfully");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/subscriptions/c/{}", Uuid::new_v4()))
        .insert_header(("Authorization", bearer(follower)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Channel not found");
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn racing_toggles_never_fail() {
    let pool = setup_test_db().await.expect("test db");
    let owner = insert_user(&pool, "owner").await;
    let fan = insert_user(&pool, "fan").await;
    let video_id = insert_video(&pool, owner, "Clip", true).await;

    let likes = LikeService::new(pool.clone());
    let subscriptions = SubscriptionService::new(pool.clone());

    for round in 0..10 {
        let like_results =
            join_all((0..16).map(|_| likes.toggle(fan, LikeTarget::video(video_id)))).await;
        let sub_results = join_all((0..16).map(|_| subscriptions.toggle(fan, owner))).await;

        for result in like_results.iter() {
            assert!(result.is_ok(), "round {round}: like toggle failed: {result:?}");
        }
        for result in sub_results.iter() {
            assert!(result.is_ok(), "round {round}: subscription toggle failed: {result:?}");
        }

        let like_rows: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM likes WHERE liked_by = $1 AND target_id = $2",
        )
        .bind(fan)
        .bind(video_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        let sub_rows: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2",
        )
        .bind(fan)
        .bind(owner)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(like_rows <= 1, "round {round}: {like_rows} likes");
        assert!(sub_rows <= 1, "round {round}: {sub_rows} subscriptions");
    }
}
