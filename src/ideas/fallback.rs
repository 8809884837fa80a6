use crate::ideas::ContentIdeas;
use crate::AggregateStats;

const THEME_IDEAS: usize = 3;
const HASHTAG_IDEAS: usize = 2;

const EVERGREEN_IDEAS: [&str; 8] = [
    "What's the worst advice you've received about your career?",
    "Unpopular opinion: Most 'productivity' advice is just procrastination",
    "The skill that changed my life (and why schools don't teach it)",
    "If you're struggling with imposter syndrome, read this",
    "Things I wish I knew before starting my career",
    "I tracked every hour of my week. Here's where the time actually went",
    "The one question I ask before starting any new project",
    "3 lessons from my biggest failure this year",
];

const HOOK_TEMPLATES: [&str; 15] = [
    "Unpopular opinion:",
    "Hot take:",
    "The harsh truth about",
    "What nobody tells you about",
    "I wish someone told me",
    "Stop doing this if you want to",
    "Here's what I learned after",
    "The biggest lie about",
    "Why everyone gets this wrong:",
    "This changed everything for me:",
    "Thread: Why",
    "Controversial take:",
    "The uncomfortable truth:",
    "What I wish I knew:",
    "Stop believing that",
];

const STRATEGY_INSIGHTS: [&str; 5] = [
    "Questions and controversial takes drive engagement",
    "Threads perform better than single posts for complex topics",
    "Personal stories resonate more than generic advice",
    "Timing matters: post when your audience is most active",
    "Engage with replies within the first hour for better reach",
];

pub fn fallback_ideas(stats: &AggregateStats) -> ContentIdeas {
    let themes: Vec<&str> = stats
        .topic_themes
        .iter()
        .take(THEME_IDEAS)
        .map(String::as_str)
        .collect();
    let hashtags: Vec<&str> = stats
        .top_hashtags
        .iter()
        .take(HASHTAG_IDEAS)
        .map(|entry| entry.hashtag.as_str())
        .collect();

    let mut tweet_ideas: Vec<String> = themes
        .iter()
        .map(|theme| format!("Thread: {} mistakes everyone makes", theme))
        .collect();
    tweet_ideas.extend(
        hashtags
            .iter()
            .map(|hashtag| format!("Hot take: {} is overrated. Here's why...", hashtag)),
    );
    tweet_ideas.extend(EVERGREEN_IDEAS.iter().map(|idea| idea.to_string()));

    let mut strategy_insights: Vec<String> =
        STRATEGY_INSIGHTS.iter().map(|insight| insight.to_string()).collect();
    if !stats.top_hashtags.is_empty() {
        let tags: Vec<String> = stats
            .top_hashtags
            .iter()
            .take(3)
            .map(|entry| format!("#{}", entry.hashtag))
            .collect();
        strategy_insights.push(format!(
            "Anchor posts on the hashtags competitors reuse most: {}",
            tags.join(", ")
        ));
    }

    ContentIdeas {
        tweet_ideas,
        hook_ideas: HOOK_TEMPLATES.iter().map(|hook| hook.to_string()).collect(),
        strategy_insights,
    }
}
