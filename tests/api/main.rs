mod chat;
mod helpers;
mod resets;
