fn main() {
    mealie_backup::cli::entrypoint();
}
