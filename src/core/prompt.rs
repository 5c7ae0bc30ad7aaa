use serde_json::Number;

/// Number of posts requested per product.
pub const POST_COUNT: usize = 5;

pub const PLATFORMS: [&str; 3] = ["Twitter", "Instagram", "LinkedIn"];

/// Build the generation prompt for a product.
///
/// The category line is left blank when `category` is `None` or empty.
pub fn build_prompt(
    name: &str,
    description: &str,
    price: &Number,
    category: Option<&str>,
) -> String {
    let category_line = match category {
        Some(category) if !category.is_empty() => format!("Category: {}", category),
        _ => String::new(),
    };

    format!(
        r#"Generate {count} social media posts for this product:

Product: {name}
Description: {description}
Price: ${price}
{category_line}

Format each post as:
Platform: Content

Include posts for {platforms}. Use emojis and make them engaging.

Return response as JSON object, where the key is "posts" and the value is an array of objects.
Each object should have "platform" and "content" properties.
"#,
        count = POST_COUNT,
        platforms = platform_list(),
    )
}

// "Twitter, Instagram, and LinkedIn"
fn platform_list() -> String {
    match PLATFORMS.split_last() {
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{}, and {}", rest.join(", "), last),
        None => String::new(),
    }
}
