use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A savings goal with a target amount and progress tracking.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub target_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub current_amount: Decimal,
    /// Optional date the goal should be reached by.
    pub target_date: Option<NaiveDate>,
    #[sea_orm(default_value = "false")]
    pub completed: bool,
    /// The user who owns this goal.
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
