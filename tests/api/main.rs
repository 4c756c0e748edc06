mod client;
mod contact;
mod health_check;
