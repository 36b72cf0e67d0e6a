use serde_json::Value;

/// How many participants a card shows before collapsing the rest into "+K more".
pub const MAX_VISIBLE_PARTICIPANTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<Participant>,
}

impl Activity {
    // The server payload is not trusted to be well-formed: missing or
    // malformed fields normalize to empty/zero instead of failing the render.
    pub fn from_value(v: &Value) -> Self {
        let participants = match v.get("participants") {
            Some(Value::Array(items)) => items.iter().map(Participant::from_value).collect(),
            _ => Vec::new(),
        };

        Self {
            description: str_field(v, "description"),
            schedule: str_field(v, "schedule"),
            max_participants: lenient_int(v.get("max_participants")),
            participants,
        }
    }

    // May go negative when the server over-books; rendered as-is.
    pub fn spots_left(&self) -> i64 {
        self.max_participants - self.participants.len() as i64
    }
}

fn str_field(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Numbers and numeric strings count; everything else is 0.
fn lenient_int(v: Option<&Value>) -> i64 {
    match v {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
        _ => 0,
    }
}

/* -----------------------------
   Participant shapes
----------------------------- */

// The API returns participants either as bare strings or as records with a
// grab-bag of naming fields. Nulls and scalar oddballs show up too.
#[derive(Debug, Clone, PartialEq)]
pub enum Participant {
    Missing,
    Plain(String),
    Record(ParticipantRecord),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRecord {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub id: Option<String>,
    raw: Value,
}

// A field only counts when it would be truthy upstream: empty strings,
// zero, and false all fall through to the next candidate.
fn truthy_string(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

impl Participant {
    pub fn from_value(v: &Value) -> Self {
        match v {
            Value::Null => Participant::Missing,
            Value::String(s) => Participant::Plain(s.clone()),
            Value::Number(n) => Participant::Plain(n.to_string()),
            Value::Bool(b) => Participant::Plain(b.to_string()),
            Value::Object(map) => Participant::Record(ParticipantRecord {
                name: truthy_string(map.get("name")),
                full_name: truthy_string(map.get("full_name")),
                email: truthy_string(map.get("email")),
                username: truthy_string(map.get("username")),
                id: truthy_string(map.get("id")),
                raw: v.clone(),
            }),
            // Arrays carry no usable fields; keep them around for the
            // serialized-form fallback only.
            Value::Array(_) => Participant::Record(ParticipantRecord {
                name: None,
                full_name: None,
                email: None,
                username: None,
                id: None,
                raw: v.clone(),
            }),
        }
    }

    /// What the card shows for this participant.
    /// Priority: name, full_name, email, username, id, serialized record.
    pub fn label(&self) -> String {
        match self {
            Participant::Missing => "Unknown".to_string(),
            Participant::Plain(s) => s.clone(),
            Participant::Record(r) => r
                .name
                .clone()
                .or_else(|| r.full_name.clone())
                .or_else(|| r.email.clone())
                .or_else(|| r.username.clone())
                .or_else(|| r.id.clone())
                .unwrap_or_else(|| r.serialized()),
        }
    }

    /// What the delete call sends for this participant.
    /// Priority: email, name, username, id, serialized record — email is
    /// promoted ahead of name here (unlike `label`), and full_name is never
    /// consulted. Kept exactly as the backend expects it.
    pub fn delete_identifier(&self) -> String {
        match self {
            Participant::Missing => "null".to_string(),
            Participant::Plain(s) => s.clone(),
            Participant::Record(r) => r
                .email
                .clone()
                .or_else(|| r.name.clone())
                .or_else(|| r.username.clone())
                .or_else(|| r.id.clone())
                .unwrap_or_else(|| r.serialized()),
        }
    }
}

impl ParticipantRecord {
    fn serialized(&self) -> String {
        serde_json::to_string(&self.raw).unwrap_or_default()
    }
}

/// Splits a participant list into the entries that get their own row and the
/// count folded into the trailing "+K more" row (0 when everything fits).
pub fn visible_split(participants: &[Participant]) -> (&[Participant], usize) {
    let shown = participants.len().min(MAX_VISIBLE_PARTICIPANTS);
    (&participants[..shown], participants.len() - shown)
}
