mod constant;
mod dot;
mod input;
mod mul;
mod univariate;
