pub mod update_email_dto;
