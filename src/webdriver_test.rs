// Unit tests for the WebDriver handle helpers

use super::*;

fn args(caps: &serde_json::Map<String, serde_json::Value>, key: &str) -> Vec<String> {
    caps[key]["args"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_browser_type_parse() {
    assert_eq!("firefox".parse::<BrowserType>().unwrap(), BrowserType::Firefox);
    assert_eq!("Chrome".parse::<BrowserType>().unwrap(), BrowserType::Chrome);
    assert_eq!("chromium".parse::<BrowserType>().unwrap(), BrowserType::Chrome);
    assert!("safari".parse::<BrowserType>().is_err());
}

#[test]
fn test_driver_names() {
    assert_eq!(BrowserType::Firefox.driver_name(), "geckodriver");
    assert_eq!(BrowserType::Chrome.driver_name(), "chromedriver");
}

#[test]
fn test_firefox_capabilities() {
    let caps = BrowserType::Firefox.capabilities(true, Some(ViewportSize::MOBILE), None);
    let firefox_args = args(&caps, "moz:firefoxOptions");
    assert!(firefox_args.contains(&"--headless".to_string()));
    assert!(firefox_args.contains(&"--width=375".to_string()));
    assert!(firefox_args.contains(&"--height=667".to_string()));

    let caps = BrowserType::Firefox.capabilities(false, None, None);
    assert!(args(&caps, "moz:firefoxOptions").is_empty());
}

#[test]
fn test_chrome_capabilities() {
    let dir = std::path::Path::new("/tmp/pagewright-profile");
    let caps = BrowserType::Chrome.capabilities(true, Some(ViewportSize::TABLET), Some(dir));
    let chrome_args = args(&caps, "goog:chromeOptions");
    assert!(chrome_args.contains(&"--no-sandbox".to_string()));
    assert!(chrome_args.contains(&"--headless=new".to_string()));
    assert!(chrome_args.contains(&"--window-size=768,1024".to_string()));
    assert!(chrome_args.contains(&"--user-data-dir=/tmp/pagewright-profile".to_string()));
    assert!(!caps.contains_key("moz:firefoxOptions"));
}

#[test]
fn test_key_codes() {
    assert_eq!(key_code("Enter"), "\u{E007}");
    assert_eq!(key_code("Tab"), "\u{E004}");
    assert_eq!(key_code("Escape"), "\u{E00C}");
    // Plain text is typed as-is
    assert_eq!(key_code("a"), "a");
}
