use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::scoring::EngagementScorer;
use crate::{EngagementCounts, Platform, Post, RawPost};

const MAX_SAMPLE_HASHTAGS: usize = 3;

const DEVELOPER_TEMPLATES: [&str; 10] = [
    "🚀 Here's the secret to 10x your coding productivity that most developers miss:",
    "Stop doing this if you want to become a senior developer:",
    "The harsh truth about landing your first tech job in 2024:",
    "5 JavaScript concepts that will make you a better developer:",
    "Why most developers fail at system design interviews:",
    "This React pattern changed how I write components forever:",
    "The #1 mistake junior developers make with databases:",
    "How to debug like a senior developer (thread):",
    "CSS tricks that will blow your mind:",
    "Docker concepts every developer should know:",
];

const FOUNDER_TEMPLATES: [&str; 10] = [
    "🔥 The startup advice that nobody gives you:",
    "This is why 90% of startups fail (and how to avoid it):",
    "The harsh reality of building a unicorn startup:",
    "Fundraising lessons I learned the hard way:",
    "How to build a product people actually want:",
    "The entrepreneurship myths that are keeping you broke:",
    "Why most business ideas fail before they start:",
    "Building a team when you have no money:",
    "The psychology of successful entrepreneurs:",
    "Scaling from 0 to $1M ARR (lessons learned):",
];

const GENERAL_TEMPLATES: [&str; 10] = [
    "The best advice I ever received:",
    "This changed my entire perspective on success:",
    "Here's what I wish I knew 5 years ago:",
    "The uncomfortable truth about building wealth:",
    "Why most people never reach their potential:",
    "This mindset shift transformed my career:",
    "The skills that actually matter in 2024:",
    "How to think like a successful person:",
    "The difference between busy and productive:",
    "Why networking is overrated (and what works instead):",
];

#[derive(Debug, Clone)]
pub struct SampleSource {
    platform: Platform,
    scorer: EngagementScorer,
    anchor: DateTime<Utc>,
}

impl SampleSource {
    pub fn new(platform: Platform, scorer: EngagementScorer) -> Self {
        Self {
            platform,
            scorer,
            anchor: Utc::now(),
        }
    }

    pub fn with_anchor(mut self, anchor: DateTime<Utc>) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn generate(&self, handle: &str, count: usize) -> Vec<Post> {
        let seed = stable_hash64(&handle.to_lowercase());
        let mut rng = StdRng::seed_from_u64(seed);
        let templates = templates_for(handle);

        (0..count)
            .map(|idx| {
                let text = templates[idx % templates.len()].to_string();
                let base: u64 = 100 + (idx as u64 * 50) + rng.gen_range(0..80);
                let counts = EngagementCounts {
                    likes: base + idx as u64 * 20,
                    reshares: base / 4,
                    replies: base / 6,
                    quotes: base / 20,
                    views: if matches!(self.platform, Platform::Instagram) {
                        base * rng.gen_range(40..90)
                    } else {
                        0
                    },
                };
                let posted_at = self.anchor
                    - Duration::days(idx as i64 * 2)
                    - Duration::hours(rng.gen_range(0..12));

                let raw = RawPost {
                    id: format!(
                        "{}_{}_{:x}",
                        self.platform.label(),
                        handle,
                        seed.wrapping_add(idx as u64)
                    ),
                    url: Some(post_url(self.platform, handle, seed, idx)),
                    hashtags: infer_hashtags(&text),
                    text,
                    author: String::new(),
                    created_at: posted_at.to_rfc3339(),
                    counts,
                };
                Post::from_raw(raw, self.platform, &self.scorer)
            })
            .collect()
    }
}

fn templates_for(handle: &str) -> &'static [&'static str] {
    let lowered = handle.to_lowercase();
    if lowered.contains("100x") || lowered.contains("engineer") {
        &DEVELOPER_TEMPLATES
    } else if lowered.contains("varun") || lowered.contains("entrepreneur") {
        &FOUNDER_TEMPLATES
    } else {
        &GENERAL_TEMPLATES
    }
}

fn post_url(platform: Platform, handle: &str, seed: u64, idx: usize) -> String {
    match platform {
        Platform::Twitter => format!(
            "https://twitter.com/{}/status/{}",
            handle,
            1_000_000_000_000_000_000u64 + (seed % 1_000_000) * 1_000 + idx as u64
        ),
        Platform::Instagram => format!(
            "https://www.instagram.com/reel/{:x}/",
            seed.wrapping_add(idx as u64)
        ),
    }
}

pub fn infer_hashtags(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let rules: [(&[&str], [&str; 3]); 6] = [
        (&["javascript", "js"], ["javascript", "webdev", "coding"]),
        (&["react"], ["react", "frontend", "webdev"]),
        (&["startup"], ["startup", "entrepreneur", "business"]),
        (&["developer", "coding"], ["developer", "coding", "programming"]),
        (&["css"], ["css", "webdev", "frontend"]),
        (&["docker"], ["docker", "devops", "containers"]),
    ];

    rules
        .iter()
        .filter(|(needles, _)| needles.iter().any(|needle| lowered.contains(needle)))
        .flat_map(|(_, tags)| tags.iter())
        .take(MAX_SAMPLE_HASHTAGS)
        .map(|tag| tag.to_string())
        .collect()
}

pub fn stable_hash64(value: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
