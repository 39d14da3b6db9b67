use minutes_nlp::{extract_action_items, extract_key_points, sentiment_scores, topic_terms};

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "test_data/meetings/q4_launch.txt".to_string());
    let text = std::fs::read_to_string(&path)?;

    println!("Key points:");
    for p in extract_key_points(&text, 7) { println!("  - {p}"); }
    println!("Action items:");
    for a in extract_action_items(&text, 8) { println!("  - [{}] {}", a.trigger, a.text); }
    println!("Topics: {}", topic_terms(&text, 6).join(", "));
    println!("Sentiment: {:?}", sentiment_scores(&text));
    Ok(())
}
