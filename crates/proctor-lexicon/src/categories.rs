// categories.rs — Built-in goal category keyword table.
//
// The table is fixed for the process lifetime: which categories a user's
// goals map to is configurable, the keyword content of each category is not.
// Unknown category names resolve to an empty keyword list and therefore
// never align with anything. Substring containment cannot reach irregular
// inflections ("replied", "sent"), so those are listed alongside their stems.

/// Names of the built-in categories, in table order.
pub const CATEGORY_NAMES: [&str; 10] = [
    "email",
    "calendar",
    "productivity",
    "coding",
    "research",
    "finance",
    "communication",
    "files",
    "shopping",
    "browsing",
];

/// Keywords for `category`, or an empty slice for unknown categories.
pub fn category_keywords(category: &str) -> &'static [&'static str] {
    match category {
        "email" => &[
            "email", "inbox", "reply", "replied", "compose", "draft", "send", "sent", "message",
            "mail", "gmail", "outlook",
        ],
        "calendar" => &[
            "calendar",
            "meeting",
            "schedule",
            "event",
            "invite",
            "appointment",
            "reminder",
            "agenda",
        ],
        "productivity" => &[
            "task", "todo", "note", "document", "plan", "organize", "project", "deadline",
        ],
        "coding" => &[
            "code",
            "debug",
            "commit",
            "repository",
            "function",
            "compile",
            "deploy",
            "test",
            "branch",
            "refactor",
        ],
        "research" => &[
            "search",
            "read",
            "article",
            "paper",
            "study",
            "analyze",
            "summarize",
            "source",
            "cite",
        ],
        "finance" => &[
            "invoice",
            "payment",
            "budget",
            "expense",
            "bank",
            "transfer",
            "receipt",
            "subscription",
            "tax",
        ],
        "communication" => &[
            "slack", "chat", "call", "discord", "channel", "thread", "notify", "reply",
        ],
        "files" => &[
            "file", "folder", "upload", "download", "rename", "move", "copy", "backup", "archive",
        ],
        "shopping" => &[
            "shop", "cart", "order", "checkout", "price", "product", "purchase", "deal",
        ],
        "browsing" => &["browse", "website", "visit", "page", "link", "tab", "url", "scroll"],
        _ => &[],
    }
}
