use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lead::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lead::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lead::Name).string().not_null())
                    .col(ColumnDef::new(Lead::Email).string().null())
                    .col(ColumnDef::new(Lead::Phone).string().null().unique_key())
                    .col(ColumnDef::new(Lead::Role).string().null())
                    .col(ColumnDef::new(Lead::Organization).string().null())
                    .col(ColumnDef::new(Lead::OrganizationSize).string().null())
                    .col(ColumnDef::new(Lead::Message).text().null())
                    .col(
                        ColumnDef::new(Lead::Status)
                            .string()
                            .not_null()
                            .default("NEW"),
                    )
                    .col(ColumnDef::new(Lead::UtmSource).string().null())
                    .col(ColumnDef::new(Lead::UtmMedium).string().null())
                    .col(ColumnDef::new(Lead::UtmCampaign).string().null())
                    .col(ColumnDef::new(Lead::SessionId).string().null())
                    .col(ColumnDef::new(Lead::LandingPage).string().null())
                    .col(ColumnDef::new(Lead::ScreenSize).string().null())
                    .col(ColumnDef::new(Lead::IpAddress).string().null())
                    .col(ColumnDef::new(Lead::UserAgent).text().null())
                    .col(ColumnDef::new(Lead::Referrer).text().null())
                    .col(ColumnDef::new(Lead::DeviceType).string().null())
                    .col(ColumnDef::new(Lead::Browser).string().null())
                    .col(ColumnDef::new(Lead::Os).string().null())
                    .col(
                        ColumnDef::new(Lead::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Lead::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lead::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Lead {
    #[sea_orm(iden = "leads")]
    Table,
    Id,
    Name,
    Email,
    Phone,
    Role,
    Organization,
    OrganizationSize,
    Message,
    Status,
    UtmSource,
    UtmMedium,
    UtmCampaign,
    SessionId,
    LandingPage,
    ScreenSize,
    IpAddress,
    UserAgent,
    Referrer,
    DeviceType,
    Browser,
    Os,
    CreatedAt,
    UpdatedAt,
}
