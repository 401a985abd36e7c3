use chrono::{TimeZone, Utc};
use pgqb::prelude::*;
use pgqb::{ComparatorPolicy, Entry, IdentPolicy, StatementKind};
use serde::Serialize;
use tokio_postgres::types::{ToSql, Type};

#[derive(Serialize)]
struct NewAuditLog {
    user_id: uuid::Uuid,
    operation_type: String,
    status_code: i16,
    created_at: chrono::DateTime<Utc>,
    ip_address: Option<String>,
    payload: serde_json::Value,
}

#[test]
fn select_with_every_clause() {
    let built = table("audit_logs")
        .select()
        .columns(&["id", "operation_type"])
        .filter("status_code", 200i16)
        .or([
            condition("operation_type", "login").ignore_case(),
            condition("operation_type", "logout").ignore_case(),
        ])
        .gte("created_at", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .order_by(&["created_at DESC", "id"])
        .paginate(2, 20)
        .get()
        .unwrap();

    assert_eq!(
        built.query,
        "SELECT \"id\",\"operation_type\" FROM audit_logs \
         WHERE status_code = $1 \
         AND (LOWER(operation_type) = LOWER($2) OR LOWER(operation_type) = LOWER($3)) \
         AND created_at >= $4 \
         ORDER BY created_at DESC,id LIMIT $5 OFFSET $6"
    );
    assert_eq!(built.values.len(), 6);
    assert_eq!(built.values[0], Value::Int(200));
    assert_eq!(built.values[4], Value::Int(20));
    assert_eq!(built.values[5], Value::Int(20));
}

#[test]
fn insert_from_struct() {
    let log = NewAuditLog {
        user_id: uuid::Uuid::nil(),
        operation_type: "login".into(),
        status_code: 201,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        ip_address: None,
        payload: serde_json::json!({"agent": "curl"}),
    };

    let built = table("audit_logs")
        .insert()
        .obj(&log)
        .unwrap()
        .returning(&["id"])
        .get()
        .unwrap();

    assert_eq!(
        built.query,
        "INSERT INTO audit_logs (user_id,operation_type,status_code,created_at,ip_address,payload) \
         VALUES ($1,$2,$3,$4,$5,$6) RETURNING id"
    );
    // serde flattens uuids and timestamps to strings
    assert_eq!(
        built.values[0],
        Value::Text("00000000-0000-0000-0000-000000000000".into())
    );
    assert_eq!(built.values[2], Value::Int(201));
    assert_eq!(built.values[4], Value::Null);
    assert_eq!(
        built.values[5],
        Value::Json(serde_json::json!({"agent": "curl"}))
    );
}

#[test]
fn typed_values_survive_set() {
    let id = uuid::Uuid::new_v4();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let built = table("sessions")
        .update()
        .set("last_seen", at)
        .set("score", 1.5f64)
        .set("note", None::<String>)
        .eq("id", id)
        .get()
        .unwrap();

    assert_eq!(
        built.query,
        "UPDATE sessions SET last_seen = $1, score = $2, note = $3 WHERE id = $4"
    );
    assert_eq!(
        built.values,
        vec![
            Value::Timestamp(at),
            Value::Float(1.5),
            Value::Null,
            Value::Uuid(id)
        ]
    );
}

#[test]
fn params_ref_matches_values() {
    let built = table("users")
        .select()
        .eq("id", 7i64)
        .in_list("role", vec!["admin", "owner"])
        .get()
        .unwrap();
    let params = built.params_ref();
    assert_eq!(params.len(), built.values.len());

    let mut buf = bytes::BytesMut::new();
    params[0].to_sql_checked(&Type::INT8, &mut buf).unwrap();
    assert_eq!(&buf[..], &7i64.to_be_bytes());

    buf.clear();
    params[1].to_sql_checked(&Type::TEXT, &mut buf).unwrap();
    assert_eq!(&buf[..], b"admin");
}

#[test]
fn built_query_serializes() {
    let built = table("users")
        .select()
        .filter("name", "ian")
        .filter("active", true)
        .get()
        .unwrap();
    let json = serde_json::to_value(&built).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "query": "SELECT * FROM users WHERE name = $1 AND active = $2",
            "values": ["ian", true]
        })
    );
}

#[test]
fn nested_trees_built_outside_a_builder() {
    let name_matches: Vec<Entry> = [("john", "doe"), ("jona", "dona")]
        .into_iter()
        .map(|(first, last)| and([condition("first_name", first), condition("last_name", last)]))
        .collect();

    let built = table("users").count().or(name_matches).get().unwrap();
    assert_eq!(
        built.query,
        "SELECT COUNT(*) FROM users WHERE ((first_name = $1 AND last_name = $2) OR (first_name = $3 AND last_name = $4))"
    );
    assert_eq!(
        built.values,
        vec![
            Value::from("john"),
            Value::from("doe"),
            Value::from("jona"),
            Value::from("dona")
        ]
    );
}

#[test]
fn statement_kinds() {
    let users = table("users");
    assert_eq!(users.select().kind(), StatementKind::Select);
    assert_eq!(users.count().kind(), StatementKind::Count);
    assert_eq!(users.insert().kind(), StatementKind::Insert);
    assert_eq!(users.update().kind(), StatementKind::Update);
    assert_eq!(users.delete().kind(), StatementKind::Delete);
    assert_eq!(StatementKind::Count.to_string(), "COUNT");
}

#[test]
fn identifiers_are_stripped_by_default() {
    let built = table("users; DROP TABLE users")
        .select()
        .filter("id) OR (1=1", 1)
        .get()
        .unwrap();
    assert_eq!(
        built.query,
        "SELECT * FROM users DROP TABLE users WHERE idOR11 = $1"
    );
}

#[test]
fn reject_policy_surfaces_first_bad_identifier() {
    let config = QbConfig::new().with_ident_policy(IdentPolicy::Reject);
    let err = table_with("users", config)
        .insert()
        .set("name", "ok")
        .set("email\"", "x")
        .set("ph one", "y")
        .get()
        .unwrap_err();
    assert_eq!(err, QbError::InvalidIdentifier("email\"".into()));
    assert!(err.is_contract_violation());
}

#[test]
fn strict_comparators() {
    let config = QbConfig::new().with_comparator_policy(ComparatorPolicy::Strict);
    let users = table_with("users", config);
    assert!(users.select().filter_op("id", 1, "<=").get().is_ok());
    assert_eq!(
        users.select().filter_op("name", "x%", "ILIKE").get().unwrap_err(),
        QbError::UnknownComparator("ILIKE".into())
    );
}

#[test]
fn guarded_operations() {
    let users = table("users");

    let err = users.delete().get().unwrap_err();
    assert!(err.is_unguarded_delete());
    assert!(err.to_string().contains("users"));

    assert!(matches!(
        users.insert().get().unwrap_err(),
        QbError::EmptySet { statement: "INSERT", .. }
    ));
    assert!(matches!(
        users.update().eq("id", 1).get().unwrap_err(),
        QbError::EmptySet { statement: "UPDATE", .. }
    ));
}

#[test]
fn mismatched_parameter_types_are_rejected() {
    let mut buf = bytes::BytesMut::new();
    let err = Value::Int(7)
        .to_sql_checked(&Type::TEXT, &mut buf)
        .err()
        .unwrap();
    assert!(err.to_string().contains("text"));

    // obj() binds uuid fields as text; the server's uuid parameter refuses them
    let built = table("sessions")
        .insert()
        .obj(&serde_json::json!({"id": uuid::Uuid::nil()}))
        .unwrap()
        .get()
        .unwrap();
    assert!(built.params_ref()[0].to_sql_checked(&Type::UUID, &mut buf).is_err());
    assert!(buf.is_empty());
}
