pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_envelope_serializes_fields() {
        let m = types::MessageEnvelope { message: "done".into(), data: 7 };
        let json = serde_json::to_value(&m).expect("serialize");
        assert_eq!(json["message"], "done");
        assert_eq!(json["data"], 7);
    }
}
