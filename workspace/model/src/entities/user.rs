use sea_orm::entity::prelude::*;

/// Represents a user of the system.
///
/// Registration, password hashing and sessions belong to the auth layer and
/// are not modeled here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A user owns multiple of each resource.
    #[sea_orm(has_many = "super::account::Entity")]
    Account,
    #[sea_orm(has_many = "super::bill::Entity")]
    Bill,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
    #[sea_orm(has_many = "super::goal::Entity")]
    Goal,
}

impl ActiveModelBehavior for ActiveModel {}
