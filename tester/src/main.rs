use reqwest::Client;
use serde_json::{Value, json};
use widget::{Post, PostQuery};

const BASE_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() {
    let client = Client::new();

    let electronics = post_json(&client, "/categories", json!({ "name": "Electronics" })).await;
    let books = post_json(&client, "/categories", json!({ "name": "Books" })).await;

    let electronics_id = electronics["data"]["id"].as_str().unwrap().to_string();
    let books_id = books["data"]["id"].as_str().unwrap().to_string();

    println!("Seeded categories: {electronics_id}, {books_id}");

    let seed_products = [
        ("Laptop", 999.0, "13 inch laptop", &electronics_id),
        ("Headphones", 89.5, "Over-ear headphones", &electronics_id),
        ("Compiler textbook", 59.0, "The dragon book", &books_id),
    ];

    for (name, price, description, category) in seed_products {
        let product = post_json(
            &client,
            "/products",
            json!({
                "name": name,
                "price": price,
                "description": description,
                "category": category,
            }),
        )
        .await;

        println!("Seeded product {name} -> {}", product["data"]["id"]);
    }

    let seed_posts = [
        ("Alpha release", 5),
        ("Beta release", 20),
        ("Gamma release", 100),
    ];

    for (title, views) in seed_posts {
        post_json(&client, "/posts", json!({ "title": title, "views": views })).await;
    }

    let products: Value = client
        .get(format!("{BASE_URL}/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(products["success"], true);
    println!(
        "Products listed: {}",
        products["data"].as_array().unwrap().len()
    );
    println!(
        "First populated category: {}",
        products["data"][0]["category"]["name"]
    );

    let query = PostQuery {
        views_gte: Some(10),
        views_lte: Some(100),
        title_like: None,
    };
    let posts: Vec<Post> = client
        .get(format!("{BASE_URL}/posts"))
        .query(&query)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    println!("Posts with views in [10, 100]: {}", posts.len());
}

async fn post_json(client: &Client, path: &str, body: Value) -> Value {
    client
        .post(format!("{BASE_URL}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}
