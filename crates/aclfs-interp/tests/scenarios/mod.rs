mod definitions;
mod ownership;
mod permissions;
