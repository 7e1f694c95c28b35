//! Builds the chat-completion request for a meal photo.
//!
//! Pure: no I/O, same image in gives the same request out.

use crate::domain::{ChatMessage, ContentPart, ImageUrl, MessageContent, ProviderRequest, Role};

/// Prefix prepended to bare base64 payloads.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

const SYSTEM_PROMPT: &str = "You are a nutrition expert that analyzes food images. \
Identify all food items in the image, estimate their calories, and provide a total calorie count. \
Return the response in a structured format with food items, individual calories, and total calories. \
Be as accurate as possible.";

const USER_PROMPT: &str = "Analyze this food image. Identify all food items, estimate calories for each item, \
and provide a total calorie count. Format your response as a JSON object with the following structure: \
{ foodItems: [{ name: string, calories: number, quantity?: string, unit?: string }], \
totalCalories: number, nutritionalSummary: string }";

/// Ensure the image is a data URI. Already-prefixed input is returned unchanged.
pub fn normalize_image(image_data: &str) -> String {
    if image_data.starts_with("data:image") {
        image_data.to_string()
    } else {
        format!("{}{}", JPEG_DATA_URI_PREFIX, image_data)
    }
}

/// Build the provider request: fixed system instruction, then a user turn
/// with the JSON-shape instruction and the inlined image.
pub fn build_request(image_data: &str) -> ProviderRequest {
    ProviderRequest {
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
            },
            ChatMessage {
                role: Role::User,
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: USER_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: normalize_image(image_data),
                        },
                    },
                ]),
            },
        ],
    }
}
