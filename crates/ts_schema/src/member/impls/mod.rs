mod list;
mod num;
mod object;
mod string;
