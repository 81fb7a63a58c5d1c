use uuid::Uuid;

/// Process-wide conversation identity shared with the backend. Created once at
/// startup and never rotated; the backend can only be asked to forget its side
/// of the context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: String,
}

impl Default for Session {
    fn default() -> Session {
        return Session::new(&Session::create_id());
    }
}

impl Session {
    pub fn new(id: &str) -> Session {
        return Session { id: id.to_string() };
    }

    pub fn create_id() -> String {
        let short = Uuid::new_v4()
            .to_string()
            .split('-')
            .enumerate()
            .filter_map(|(idx, str)| {
                if idx > 1 {
                    return None;
                }
                return Some(str);
            })
            .collect::<Vec<&str>>()
            .join("-");

        return format!("session_{short}");
    }
}
