pub mod datasource_entity;
pub mod datasource_fs_repository;
pub mod datasource_repository_trait;
