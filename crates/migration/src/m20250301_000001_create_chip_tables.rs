use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Create the chip tracking schema: users, operations, phone numbers and everything hanging off them.
///
/// No foreign keys are declared; dependent rows are removed by the query layer.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::OpenId, 64).not_null().unique_key())
                    .col(text_null(Users::Name))
                    .col(string_len_null(Users::Email, 320))
                    .col(string_len_null(Users::Password, 255))
                    .col(string_len_null(Users::LoginMethod, 64))
                    .col(string_len(Users::Role, 16).not_null().default("user"))
                    .col(text_null(Users::ProfilePhoto))
                    .col(string_len(Users::Theme, 16).not_null().default("dark"))
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Users::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Users::LastSignedIn)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Operations::Table)
                    .if_not_exists()
                    .col(pk_auto(Operations::Id))
                    .col(string_len(Operations::Name, 100).not_null())
                    .col(text_null(Operations::Description))
                    .col(integer(Operations::UserId).not_null())
                    .col(
                        timestamp_with_time_zone(Operations::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Operations::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PhoneNumbers::Table)
                    .if_not_exists()
                    .col(pk_auto(PhoneNumbers::Id))
                    .col(string_len(PhoneNumbers::Number, 20).not_null())
                    .col(string_len_null(PhoneNumbers::Operator, 50))
                    .col(string_len_null(PhoneNumbers::DeviceType, 50))
                    .col(string_len_null(PhoneNumbers::Device, 100))
                    .col(
                        string_len(PhoneNumbers::Status, 16)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(string_len_null(PhoneNumbers::AccountType, 50))
                    .col(text_null(PhoneNumbers::Purpose))
                    .col(text_null(PhoneNumbers::Notes))
                    .col(string_len_null(PhoneNumbers::Location, 100))
                    .col(string_len_null(PhoneNumbers::Region, 50))
                    .col(string_len_null(PhoneNumbers::LastIp, 45))
                    .col(integer_null(PhoneNumbers::IpChangeFrequency))
                    .col(string_len_null(PhoneNumbers::Owner, 100))
                    .col(string_len_null(PhoneNumbers::PurchaseBatch, 50))
                    .col(timestamp_with_time_zone_null(PhoneNumbers::ActivationDate))
                    .col(integer_null(PhoneNumbers::RiskScore).default(50))
                    .col(string_len_null(PhoneNumbers::Tier, 1).default("B"))
                    .col(integer_null(PhoneNumbers::TotalMessages).default(0))
                    .col(integer_null(PhoneNumbers::TotalBlocks).default(0))
                    .col(integer_null(PhoneNumbers::TotalRestrictions).default(0))
                    .col(integer_null(PhoneNumbers::AvgRecoveryHours))
                    .col(timestamp_with_time_zone_null(PhoneNumbers::LastBlockDate))
                    .col(timestamp_with_time_zone_null(
                        PhoneNumbers::LastRestrictionDate,
                    ))
                    .col(
                        timestamp_with_time_zone(PhoneNumbers::AddedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(PhoneNumbers::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(PhoneNumbers::UserId).not_null())
                    .col(integer(PhoneNumbers::OperationId).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk_auto(Events::Id))
                    .col(integer(Events::PhoneNumberId).not_null())
                    .col(string_len(Events::EventType, 32).not_null())
                    .col(string_len_null(Events::PreviousStatus, 50))
                    .col(string_len_null(Events::NewStatus, 50))
                    .col(integer_null(Events::MessageVolume))
                    .col(text_null(Events::Description))
                    .col(text_null(Events::Metadata))
                    .col(timestamp_with_time_zone(Events::EventDate).not_null())
                    .col(
                        timestamp_with_time_zone(Events::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(pk_auto(Tags::Id))
                    .col(string_len(Tags::Name, 50).not_null())
                    .col(string_len_null(Tags::Color, 7))
                    .col(integer(Tags::UserId).not_null())
                    .col(
                        timestamp_with_time_zone(Tags::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PhoneNumberTags::Table)
                    .if_not_exists()
                    .col(pk_auto(PhoneNumberTags::Id))
                    .col(integer(PhoneNumberTags::PhoneNumberId).not_null())
                    .col(integer(PhoneNumberTags::TagId).not_null())
                    .col(
                        timestamp_with_time_zone(PhoneNumberTags::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RestrictionAlarms::Table)
                    .if_not_exists()
                    .col(pk_auto(RestrictionAlarms::Id))
                    .col(integer(RestrictionAlarms::PhoneNumberId).not_null())
                    .col(integer(RestrictionAlarms::UserId).not_null())
                    .col(timestamp_with_time_zone(RestrictionAlarms::RestrictionStartTime).not_null())
                    .col(timestamp_with_time_zone(RestrictionAlarms::ExpectedReturnTime).not_null())
                    .col(timestamp_with_time_zone(RestrictionAlarms::NotifyAt).not_null())
                    .col(
                        boolean(RestrictionAlarms::IsActive)
                            .not_null()
                            .default(true),
                    )
                    .col(
                        boolean(RestrictionAlarms::WasNotified)
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_with_time_zone_null(RestrictionAlarms::NotifiedAt))
                    .col(text_null(RestrictionAlarms::Notes))
                    .col(
                        timestamp_with_time_zone(RestrictionAlarms::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(RestrictionAlarms::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(pk_auto(Notifications::Id))
                    .col(integer(Notifications::UserId).not_null())
                    .col(integer_null(Notifications::PhoneNumberId))
                    .col(integer_null(Notifications::AlarmId))
                    .col(string_len(Notifications::NotificationType, 32).not_null())
                    .col(string_len(Notifications::Title, 200).not_null())
                    .col(text(Notifications::Message).not_null())
                    .col(boolean(Notifications::IsRead).not_null().default(false))
                    .col(boolean(Notifications::PlaySound).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Notifications::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SystemAlerts::Table)
                    .if_not_exists()
                    .col(pk_auto(SystemAlerts::Id))
                    .col(integer(SystemAlerts::UserId).not_null())
                    .col(integer_null(SystemAlerts::PhoneNumberId))
                    .col(string_len(SystemAlerts::AlertType, 32).not_null())
                    .col(
                        string_len(SystemAlerts::Severity, 16)
                            .not_null()
                            .default("medium"),
                    )
                    .col(string_len(SystemAlerts::Title, 200).not_null())
                    .col(text(SystemAlerts::Message).not_null())
                    .col(text_null(SystemAlerts::Suggestion))
                    .col(boolean(SystemAlerts::IsResolved).not_null().default(false))
                    .col(timestamp_with_time_zone_null(SystemAlerts::ResolvedAt))
                    .col(
                        timestamp_with_time_zone(SystemAlerts::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_phone_numbers_user_id")
                    .table(PhoneNumbers::Table)
                    .col(PhoneNumbers::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_phone_numbers_operation_id")
                    .table(PhoneNumbers::Table)
                    .col(PhoneNumbers::OperationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_phone_number_id_event_date")
                    .table(Events::Table)
                    .col(Events::PhoneNumberId)
                    .col(Events::EventDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_phone_number_tags_phone_number_id")
                    .table(PhoneNumberTags::Table)
                    .col(PhoneNumberTags::PhoneNumberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restriction_alarms_notify_at")
                    .table(RestrictionAlarms::Table)
                    .col(RestrictionAlarms::IsActive)
                    .col(RestrictionAlarms::WasNotified)
                    .col(RestrictionAlarms::NotifyAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id_created_at")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_notifications_user_id_created_at")
                    .table(Notifications::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_restriction_alarms_notify_at")
                    .table(RestrictionAlarms::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_phone_number_tags_phone_number_id")
                    .table(PhoneNumberTags::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_events_phone_number_id_event_date")
                    .table(Events::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_phone_numbers_operation_id")
                    .table(PhoneNumbers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_phone_numbers_user_id")
                    .table(PhoneNumbers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SystemAlerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RestrictionAlarms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PhoneNumberTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PhoneNumbers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Operations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    OpenId,
    Name,
    Email,
    Password,
    LoginMethod,
    Role,
    ProfilePhoto,
    Theme,
    CreatedAt,
    UpdatedAt,
    LastSignedIn,
}

#[derive(DeriveIden)]
pub enum Operations {
    Table,
    Id,
    Name,
    Description,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum PhoneNumbers {
    Table,
    Id,
    Number,
    Operator,
    DeviceType,
    Device,
    Status,
    AccountType,
    Purpose,
    Notes,
    Location,
    Region,
    LastIp,
    IpChangeFrequency,
    Owner,
    PurchaseBatch,
    ActivationDate,
    RiskScore,
    Tier,
    TotalMessages,
    TotalBlocks,
    TotalRestrictions,
    AvgRecoveryHours,
    LastBlockDate,
    LastRestrictionDate,
    AddedAt,
    UpdatedAt,
    UserId,
    OperationId,
}

#[derive(DeriveIden)]
pub enum Events {
    Table,
    Id,
    PhoneNumberId,
    EventType,
    PreviousStatus,
    NewStatus,
    MessageVolume,
    Description,
    Metadata,
    EventDate,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Tags {
    Table,
    Id,
    Name,
    Color,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum PhoneNumberTags {
    Table,
    Id,
    PhoneNumberId,
    TagId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum RestrictionAlarms {
    Table,
    Id,
    PhoneNumberId,
    UserId,
    RestrictionStartTime,
    ExpectedReturnTime,
    NotifyAt,
    IsActive,
    WasNotified,
    NotifiedAt,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Notifications {
    Table,
    Id,
    UserId,
    PhoneNumberId,
    AlarmId,
    NotificationType,
    Title,
    Message,
    IsRead,
    PlaySound,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum SystemAlerts {
    Table,
    Id,
    UserId,
    PhoneNumberId,
    AlertType,
    Severity,
    Title,
    Message,
    Suggestion,
    IsResolved,
    ResolvedAt,
    CreatedAt,
}
