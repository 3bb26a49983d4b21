use serde_json::{json, Value};

use domain::{Comment, PostWithAuthor};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base = std::env::var("QUILL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = reqwest::Client::new();
    println!("Starting Quill smoke client against {}...", base);

    println!("\n[1/4] Fetching published posts...");
    let resp = client.get(format!("{}/api/posts", base)).send().await?;
    if !resp.status().is_success() {
        println!("   -> ❌ Listing failed: {}", resp.text().await?);
        return Ok(());
    }
    let posts: Vec<PostWithAuthor> = resp.json().await?;
    println!("   -> {} post(s)", posts.len());
    for p in &posts {
        println!("      - #{} {} (by {})", p.post.id, p.post.title, p.author_name());
    }

    let Some(first) = posts.first() else {
        println!("\nNo published posts, nothing more to check.");
        return Ok(());
    };
    let id = first.post.id;

    println!("\n[2/4] Loading post #{}...", id);
    let detail: Value = client
        .get(format!("{}/api/posts/{}", base, id))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let count = detail["comments"].as_array().map_or(0, Vec::len);
    println!("   -> '{}' with {} comment(s)", detail["post"]["post"]["title"], count);

    println!("\n[3/4] Submitting comment...");
    let resp = client
        .post(format!("{}/api/posts/{}/comments", base, id))
        .json(&json!({
            "user_name": "Ferris",
            "email": "",
            "content": "This is a message from the Quill smoke client!"
        }))
        .send()
        .await?;

    if resp.status().is_success() {
        let rows: Vec<Comment> = resp.json().await?;
        for c in rows {
            println!("   -> ✅ Stored as #{} at {}", c.id, c.created_at);
        }
    } else {
        println!("   -> ❌ Failed to send: {}", resp.text().await?);
    }

    println!("\n[4/4] Fetching author profile...");
    let author: Value = client
        .get(format!("{}/api/author", base))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    match author["author"]["name"].as_str() {
        Some(name) => println!(
            "   -> {} ({} post(s))",
            name,
            author["posts"].as_array().map_or(0, Vec::len)
        ),
        None => println!("   -> No author information yet"),
    }

    Ok(())
}
