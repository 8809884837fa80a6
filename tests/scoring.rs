use engagement_patterns::scoring::{rank_posts, top_posts, EngagementScorer, EngagementWeights};
use engagement_patterns::{EngagementCounts, Platform, Post, RawPost};

fn likes_only() -> EngagementScorer {
    EngagementScorer::new(EngagementWeights {
        likes: 1.0,
        reshares: 0.0,
        replies: 0.0,
        quotes: 0.0,
        views: 0.0,
        multiplier: 1.0,
    })
}

fn post(id: &str, likes: u64) -> Post {
    let raw = RawPost {
        id: id.to_string(),
        counts: EngagementCounts {
            likes,
            ..EngagementCounts::default()
        },
        ..RawPost::default()
    };
    Post::from_raw(raw, Platform::Twitter, &likes_only())
}

#[test]
fn twitter_weights_favor_reshares_and_quotes() {
    let scorer = EngagementScorer::new(EngagementWeights::twitter());
    let counts = EngagementCounts {
        likes: 10,
        reshares: 2,
        replies: 4,
        quotes: 1,
        views: 5000,
    };

    let expected = 10.0 + 2.0 * 2.0 + 4.0 * 1.5 + 1.0 * 2.0;
    assert!((scorer.score(&counts) - expected).abs() < 1e-6);
}

#[test]
fn instagram_weights_count_views_lightly() {
    let scorer = EngagementScorer::new(EngagementWeights::instagram());
    let counts = EngagementCounts {
        likes: 100,
        reshares: 0,
        replies: 10,
        quotes: 0,
        views: 1000,
    };

    assert!((scorer.score(&counts) - 130.0).abs() < 1e-6);
}

#[test]
fn missing_counts_score_zero() {
    let scorer = EngagementScorer::new(EngagementWeights::twitter());
    assert!((scorer.score(&EngagementCounts::default()) - 0.0).abs() < 1e-6);
}

#[test]
fn negative_and_nan_weights_are_ignored() {
    let scorer = EngagementScorer::new(EngagementWeights {
        likes: -3.0,
        reshares: f64::NAN,
        replies: 1.0,
        quotes: 0.0,
        views: 0.0,
        multiplier: 2.0,
    });
    let counts = EngagementCounts {
        likes: 50,
        reshares: 50,
        replies: 5,
        quotes: 0,
        views: 0,
    };

    let score = scorer.score(&counts);
    assert!(score.is_finite());
    assert!((score - 10.0).abs() < 1e-6);

    let zeroed = EngagementScorer::new(EngagementWeights {
        multiplier: -1.0,
        ..EngagementWeights::twitter()
    });
    assert!((zeroed.score(&counts) - 0.0).abs() < 1e-6);
}

#[test]
fn raw_posts_accept_platform_field_names() {
    let raw: RawPost = serde_json::from_str(
        r##"{
            "shortcode": "abc",
            "caption": "Morning routine reel",
            "competitor": "someone",
            "date": "2024-01-15T10:30:00Z",
            "likes": 120,
            "comments": 8,
            "views": 4000,
            "hashtags": ["#Fitness", "Morning", "  "]
        }"##,
    )
    .unwrap();

    assert_eq!(raw.id, "abc");
    assert_eq!(raw.counts.replies, 8);
    assert_eq!(raw.counts.reshares, 0);

    let post = Post::from_raw(
        raw,
        Platform::Instagram,
        &EngagementScorer::new(EngagementWeights::instagram()),
    );
    assert_eq!(post.author, "someone");
    assert_eq!(post.hashtags, vec!["fitness".to_string(), "morning".to_string()]);
    assert!((post.engagement_score() - (120.0 + 16.0 + 40.0)).abs() < 1e-6);
}

#[test]
fn retweets_alias_maps_to_reshares() {
    let raw: RawPost =
        serde_json::from_str(r#"{"text": "hi", "likes": 1, "retweets": 7}"#).unwrap();
    assert_eq!(raw.counts.reshares, 7);
}

#[test]
fn rank_posts_sorts_descending_and_truncates() {
    let mut posts = vec![post("a", 10), post("b", 30), post("c", 20), post("d", 5)];
    rank_posts(&mut posts, 3);

    let ids: Vec<&str> = posts.iter().map(|post| post.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[test]
fn rank_posts_keeps_incoming_order_on_ties() {
    let mut posts = vec![post("first", 10), post("top", 40), post("second", 10)];
    rank_posts(&mut posts, 10);

    let ids: Vec<&str> = posts.iter().map(|post| post.id.as_str()).collect();
    assert_eq!(ids, vec!["top", "first", "second"]);
}

#[test]
fn top_posts_leaves_input_untouched() {
    let posts = vec![post("a", 1), post("b", 3), post("c", 2)];
    let top = top_posts(&posts, 2);

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].id, "b");
    assert_eq!(top[1].id, "c");
    assert_eq!(posts[0].id, "a");
}

#[test]
fn with_author_keeps_the_score() {
    let scored = post("a", 12).with_author("alice");
    assert_eq!(scored.author, "alice");
    assert!((scored.engagement_score() - 12.0).abs() < 1e-6);
}

#[test]
fn stored_score_matches_stored_counts() {
    let scorer = EngagementScorer::new(EngagementWeights::twitter());
    let raw = RawPost {
        id: "mixed".to_string(),
        counts: EngagementCounts {
            likes: 42,
            reshares: 7,
            replies: 3,
            quotes: 2,
            views: 900,
        },
        ..RawPost::default()
    };

    let post = Post::from_raw(raw, Platform::Twitter, &scorer).with_author("alice");

    assert_eq!(post.counts().reshares, 7);
    assert!((post.engagement_score() - scorer.score(post.counts())).abs() < 1e-6);
}
