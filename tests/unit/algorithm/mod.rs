mod compression;
mod generator;
