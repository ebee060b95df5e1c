use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A recurring monthly obligation such as rent or an internet subscription.
///
/// `due_date` holds the stored raw representation of the nominal due date:
/// either a plain `YYYY-MM-DD` calendar date or a full RFC 3339 timestamp.
/// Only the day-of-month component is significant for recurrence; parsing
/// and projection happen in the `schedule` crate at read time, and a value
/// that does not parse excludes the bill from projections rather than
/// failing them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub due_date: String,
    /// Amount due per occurrence. Non-negative, enforced at write time.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    /// The user who owns this bill.
    pub owner_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
