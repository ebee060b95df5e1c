use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string_null(Users::Email))
                    .to_owned(),
            )
            .await?;

        // Create accounts table
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(pk_auto(Accounts::Id))
                    .col(string(Accounts::Name))
                    .col(string_len(Accounts::Kind, 20))
                    .col(decimal(Accounts::Balance).decimal_len(16, 4))
                    .col(string_null(Accounts::Institution))
                    .col(integer(Accounts::OwnerId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_owner")
                            .from(Accounts::Table, Accounts::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create bills table
        // DueDate is deliberately a string column: the stored value may be a
        // plain calendar date or a full timestamp, parsed at projection time.
        manager
            .create_table(
                Table::create()
                    .table(Bills::Table)
                    .if_not_exists()
                    .col(pk_auto(Bills::Id))
                    .col(string(Bills::Name))
                    .col(string(Bills::DueDate))
                    .col(decimal(Bills::Amount).decimal_len(16, 4))
                    .col(integer(Bills::OwnerId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bill_owner")
                            .from(Bills::Table, Bills::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create transactions table
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk_auto(Transactions::Id))
                    .col(date(Transactions::Date))
                    .col(decimal(Transactions::Amount).decimal_len(16, 4))
                    .col(string_len(Transactions::Kind, 10))
                    .col(string(Transactions::Vendor))
                    .col(string(Transactions::Category))
                    .col(string_null(Transactions::Notes))
                    .col(integer(Transactions::AccountId))
                    .col(integer(Transactions::OwnerId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_account")
                            .from(Transactions::Table, Transactions::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_owner")
                            .from(Transactions::Table, Transactions::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create goals table
        manager
            .create_table(
                Table::create()
                    .table(Goals::Table)
                    .if_not_exists()
                    .col(pk_auto(Goals::Id))
                    .col(string(Goals::Title))
                    .col(string_null(Goals::Description))
                    .col(decimal(Goals::TargetAmount).decimal_len(16, 4))
                    .col(decimal(Goals::CurrentAmount).decimal_len(16, 4))
                    .col(date_null(Goals::TargetDate))
                    .col(boolean(Goals::Completed).default(false))
                    .col(integer(Goals::OwnerId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_goal_owner")
                            .from(Goals::Table, Goals::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Goals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Name,
    Kind,
    Balance,
    Institution,
    OwnerId,
}

#[derive(DeriveIden)]
enum Bills {
    Table,
    Id,
    Name,
    DueDate,
    Amount,
    OwnerId,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    Date,
    Amount,
    Kind,
    Vendor,
    Category,
    Notes,
    AccountId,
    OwnerId,
}

#[derive(DeriveIden)]
enum Goals {
    Table,
    Id,
    Title,
    Description,
    TargetAmount,
    CurrentAmount,
    TargetDate,
    Completed,
    OwnerId,
}
