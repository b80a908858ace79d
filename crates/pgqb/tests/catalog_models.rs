//! Models built from catalog descriptors, end to end.

use pgqb::catalog::{CatalogColumn, Model, TableDescriptor, group_columns};
use pgqb::prelude::*;

const DESCRIPTORS: &str = r#"[
    {
        "schema": "public",
        "name": "Restaurant",
        "columns": [
            {"name": "Id", "data_type": "bigint"},
            {"name": "Name", "data_type": "text"},
            {"name": "OwnerId", "data_type": "integer"},
            {"name": "NumCustomer", "data_type": "integer", "nullable": true}
        ]
    },
    {
        "name": "owner",
        "columns": [
            {"name": "id", "data_type": "integer"},
            {"name": "full_name", "data_type": "text"}
        ]
    }
]"#;

fn models() -> (Model, Model) {
    let tables: Vec<TableDescriptor> = serde_json::from_str(DESCRIPTORS).unwrap();
    assert_eq!(tables[1].qualified_name(), "public.owner");
    (
        Model::from_descriptor(&tables[0]),
        Model::from_descriptor(&tables[1]),
    )
}

#[test]
fn self_join_with_aliased_model() {
    let (rest_a, _) = models();
    let rest_b = rest_a.alias("RestaurantB");

    let joined = rest_a.source().inner_join(
        rest_b.source(),
        rest_a.column("Name").unwrap().eq(rest_b.column("Name").unwrap()),
    );
    let sql = select([rest_b.star()]).from([joined]).to_sql().unwrap();
    assert_eq!(
        sql,
        r#"SELECT "RestaurantB".* FROM "public"."Restaurant" INNER JOIN "public"."Restaurant" "RestaurantB" ON ("Restaurant"."Name" = "RestaurantB"."Name")"#
    );
}

#[test]
fn model_columns_drive_inference() {
    let (rest, owner) = models();
    let sql = select([
        rest.column("Name").unwrap().into(),
        owner.column("full_name").unwrap().alias("owner"),
    ])
    .where_(rest.column("OwnerId").unwrap().eq(owner.column("id").unwrap()))
    .where_(rest.column("NumCustomer").unwrap().gt(arg("min")))
    .render(RenderOptions::default())
    .unwrap();

    assert_eq!(
        sql.sql,
        concat!(
            r#"SELECT "Restaurant"."Name", "owner"."full_name" "owner" "#,
            r#"FROM "public"."Restaurant", "public"."owner" "#,
            r#"WHERE ("Restaurant"."OwnerId" = "owner"."id") AND ("Restaurant"."NumCustomer" > $1)"#,
        )
    );
    assert_eq!(sql.arguments, vec!["min"]);
}

#[test]
fn unknown_column_is_reported() {
    let (rest, _) = models();
    let err = rest.column("Nope").unwrap_err();
    assert_eq!(err.to_string(), "Unknown column 'Nope' in table 'Restaurant'");
}

#[test]
fn upsert_from_model() {
    let (_, owner) = models();
    let id = owner.column("id").unwrap();
    let full_name = owner.column("full_name").unwrap();
    let excluded = Source::excluded();

    let stmt = insert_into(owner.source(), [&id, &full_name])
        .values([arg("id"), arg("name")])
        .on_conflict([&id])
        .do_update(ConflictUpdate::new().set(&full_name, excluded.column("full_name")))
        .returning([owner.star()]);
    let rendered = stmt.render(RenderOptions::default()).unwrap();
    assert_eq!(
        rendered.sql,
        r#"INSERT INTO "public"."owner" ("id","full_name") VALUES ($1, $2) ON CONFLICT ("id") DO UPDATE SET "full_name" = "excluded"."full_name" RETURNING "owner".*"#
    );

    let params = rendered
        .bind(&Bindings::new().set("id", 7_i32).set("name", "Ada".to_string()))
        .unwrap();
    assert_eq!(params.len(), 2);
}

#[test]
fn catalog_rows_become_models() {
    let rows = vec![
        CatalogColumn {
            table_schema: "public".into(),
            table_name: "school".into(),
            column_name: "name".into(),
            data_type: "text".into(),
            is_nullable: false,
        },
        CatalogColumn {
            table_schema: "public".into(),
            table_name: "school".into(),
            column_name: "enrollment_count".into(),
            data_type: "integer".into(),
            is_nullable: true,
        },
    ];
    let tables = group_columns(rows);
    assert_eq!(tables.len(), 1);
    let members: Vec<String> = tables[0].columns.iter().map(|c| c.member_name()).collect();
    assert_eq!(members, vec!["Name", "EnrollmentCount"]);

    let school = Model::from_descriptor(&tables[0]);
    let sql = select(school.all_columns()).to_sql().unwrap();
    assert_eq!(
        sql,
        r#"SELECT "school"."name", "school"."enrollment_count" FROM "public"."school""#
    );
}
