//! Sample backend records

use serde_json::{json, Value};

pub fn event_json(id: i64, title: &str, date: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "date": date,
        "description": format!("{} at the community hall", title),
        "category": "cultural",
        "location": "Community Hall",
        "maxParticipants": 120,
        "currentParticipants": 40
    })
}

pub fn member_json(id: i64, name: &str, position: &str, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "position": position,
        "email": format!("{}@aarya.example.org", name.to_lowercase()),
        "active": active
    })
}

pub fn sample_events() -> Value {
    json!([
        event_json(1, "Holi Celebration", "2024-03-25"),
        event_json(2, "Navratri Garba", "2025-10-03"),
        event_json(3, "Cricket League", "2025-06-15T09:30:00"),
        event_json(4, "Career Workshop", "2025-02-20")
    ])
}

pub fn sample_members() -> Value {
    json!([
        member_json(5, "Priya", "President", true),
        member_json(6, "Rahul", "Event Coordinator", true),
        member_json(7, "Anita", "Member", true),
        member_json(8, "Vikram", "Member", false)
    ])
}
