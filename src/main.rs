//! Manual smoke test for the Gemini API integration.
//!
//! Usage: GEMINI_API_KEY=your_key cargo run

use gemini_probe::{GeminiClient, GenerateRequest, Message};

const MODEL: &str = "gemini-2.0-flash-exp";

const QUESTION: &str = "What legal services does the Law Offices of Pritpal Singh offer?";

const SYSTEM_PROMPT: &str = "You are the AI assistant for the Law Offices of Pritpal Singh, a California real estate law firm. \n\
You provide general information only - no legal advice. No attorney-client relationship is formed through this chat.\n\
Direct users to call (510) 443-2123 or book a consultation for specific legal matters.";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let client = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            println!("\nTo test the Gemini API integration:");
            println!("1. Get a free API key from: https://aistudio.google.com/app/apikey");
            println!("2. Run: GEMINI_API_KEY=your_actual_key cargo run\n");
            std::process::exit(1);
        }
    };

    println!("🔄 Testing Gemini API connection...\n");

    let request = GenerateRequest {
        model: MODEL.to_string(),
        messages: vec![Message::user(QUESTION)],
        system_instruction: Some(SYSTEM_PROMPT.to_string()),
        temperature: Some(0.4),
        max_output_tokens: Some(1500),
    };

    match client.generate(&request).await {
        Ok(answer) => {
            println!("✅ Success! Gemini API is working correctly.\n");
            println!("Question: {QUESTION}");
            println!("\nResponse: {answer}");
            println!("\n✅ The chatbot integration is ready to use!");
        }
        Err(e) => {
            eprintln!("❌ Error testing Gemini API: {e}");
            println!("\nTroubleshooting:");
            println!("1. Verify your API key is correct");
            println!("2. Check that the API key has not expired");
            println!("3. Ensure you have internet connectivity");
            println!("4. Visit https://aistudio.google.com/app/apikey to manage your keys\n");
            std::process::exit(1);
        }
    }
}
