//! Mock data and responders for the dictionary backend.
//!
//! The seed data mirrors what the admin client is used with day to day: a
//! handful of common Pnar words and two user accounts. The responders
//! implement just enough of the backend's filtering and pagination for the
//! client to be exercised against realistic responses.

use payloads::{DictionaryEntry, EntryId, UserAccount};
use serde_json::{Value, json};
use wiremock::{Request, Respond, ResponseTemplate};

pub fn seed_entries() -> Vec<DictionaryEntry> {
    let mut entries = vec![
        DictionaryEntry::new("1", "salaam", "hello"),
        DictionaryEntry::new("2", "kitab", "book"),
        DictionaryEntry::new("3", "dost", "friend"),
        DictionaryEntry::new("4", "um", "water"),
        DictionaryEntry::new("5", "ka iing", "house"),
    ];
    entries[0].part_of_speech = Some("interjection".into());
    entries[1].part_of_speech = Some("noun".into());
    entries[1].difficulty_level = Some(payloads::DIFFICULTY_BEGINNER);
    entries[3].verified = true;
    entries
}

pub fn seed_users() -> Vec<UserAccount> {
    vec![
        UserAccount {
            email: "user1@example.com".into(),
            password: "password1".into(),
        },
        UserAccount {
            email: "user2@example.com".into(),
            password: "password2".into(),
        },
    ]
}

/// Wrap data in the backend's success envelope.
pub fn envelope(data: impl serde::Serialize) -> Value {
    json!({ "success": true, "data": data })
}

/// Serves `GET /dictionary`, honouring `search`, `page` and `per_page`.
pub struct ListEntries {
    pub entries: Vec<DictionaryEntry>,
}

impl Respond for ListEntries {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut page = 1u32;
        let mut per_page = 10u32;
        let mut search = String::new();
        for (key, value) in request.url.query_pairs() {
            match key.as_ref() {
                "page" => page = value.parse().unwrap_or(1),
                "per_page" => per_page = value.parse().unwrap_or(10),
                "search" => search = value.to_lowercase(),
                _ => {}
            }
        }

        let matching: Vec<&DictionaryEntry> = self
            .entries
            .iter()
            .filter(|entry| {
                search.is_empty()
                    || entry.pnar_word.to_lowercase().contains(&search)
                    || entry.english_word.to_lowercase().contains(&search)
            })
            .collect();
        let total = matching.len() as u64;
        let per_page = per_page.max(1);
        let pages = total.div_ceil(u64::from(per_page)) as u32;
        let rows: Vec<&DictionaryEntry> = matching
            .into_iter()
            .skip((page.saturating_sub(1) * per_page) as usize)
            .take(per_page as usize)
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": rows,
            "pagination": {
                "page": page,
                "per_page": per_page,
                "total": total,
                "pages": pages,
            }
        }))
    }
}

/// Serves `PUT /dictionary/{id}` by merging the request body into the seeded
/// entry.
pub struct UpdateEntry {
    pub entries: Vec<DictionaryEntry>,
}

impl Respond for UpdateEntry {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Some(id) = entry_id(request) else {
            return ResponseTemplate::new(404).set_body_string("Not found");
        };
        let Some(entry) = self.entries.iter().find(|e| e.id == id) else {
            return ResponseTemplate::new(404)
                .set_body_string("Entry not found");
        };
        let Ok(Value::Object(changes)) =
            serde_json::from_slice::<Value>(&request.body)
        else {
            return ResponseTemplate::new(400).set_body_string("Invalid body");
        };

        let mut updated = json!(entry);
        if let Value::Object(fields) = &mut updated {
            fields.extend(changes);
        }
        ResponseTemplate::new(200).set_body_json(envelope(updated))
    }
}

/// Serves `POST /dictionary`, assigning the next free id.
pub struct CreateEntry {
    pub next_id: u32,
}

impl Respond for CreateEntry {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(Value::Object(mut fields)) =
            serde_json::from_slice::<Value>(&request.body)
        else {
            return ResponseTemplate::new(400).set_body_string("Invalid body");
        };
        fields.insert("id".into(), json!(self.next_id.to_string()));
        ResponseTemplate::new(201).set_body_json(envelope(fields))
    }
}

fn entry_id(request: &Request) -> Option<EntryId> {
    request
        .url
        .path_segments()?
        .next_back()
        .map(EntryId::from)
}
