use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// The kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccountKind {
    #[sea_orm(string_value = "bank")]
    Bank,
    #[sea_orm(string_value = "credit")]
    Credit,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "savings")]
    Savings,
    #[sea_orm(string_value = "investment")]
    Investment,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Represents a financial account, like a bank account, credit card, or cash
/// wallet.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub kind: AccountKind,
    /// Current balance. Negative is legal for credit accounts.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub balance: Decimal,
    /// Financial institution name, e.g. "Chase Bank".
    pub institution: Option<String>,
    /// The user who owns this account.
    pub owner_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An account belongs to one owner.
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
