const DEVELOPER_ACCOUNTS: [&str; 10] = [
    "naval",
    "elonmusk",
    "sama",
    "paulg",
    "dhh",
    "kentcdodds",
    "dan_abramov",
    "ryanflorence",
    "wesbos",
    "addyosmani",
];

const FOUNDER_ACCOUNTS: [&str; 10] = [
    "elonmusk",
    "naval",
    "sama",
    "paulg",
    "garyvee",
    "dharmesh",
    "neerajkaushal",
    "kunalshah",
    "rohitjain_007",
    "rahulvohra",
];

const GENERAL_ACCOUNTS: [&str; 10] = [
    "naval",
    "sama",
    "paulg",
    "garyvee",
    "dharmesh",
    "kentcdodds",
    "dan_abramov",
    "wesbos",
    "addyosmani",
    "elonmusk",
];

pub fn discover_competitors(seed: &str, needed: usize) -> Vec<String> {
    let seed = normalize_handle(seed);
    let candidates: &[&str] = if seed.contains("100xengineers") || seed.contains("engineer") {
        &DEVELOPER_ACCOUNTS
    } else if seed.contains("varun") || seed.contains("entrepreneur") {
        &FOUNDER_ACCOUNTS
    } else {
        &GENERAL_ACCOUNTS
    };

    candidates
        .iter()
        .filter(|handle| **handle != seed)
        .take(needed.saturating_mul(2))
        .map(|handle| handle.to_string())
        .collect()
}

pub fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_lowercase()
}
