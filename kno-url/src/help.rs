use colored::Colorize;

pub const BANNER: &str = "Kusanagi Night Ops: URL Scrapper";

const HELP_TEXT: &str = r#"
Kusanagi Night Ops: URL Scrapper

Interactive usage:
    kno-url
    Main URL: <url> [flags]

Examples (HTML mode):
    Main URL: https://www.dailymotion.com/video/x9v4s9g
    Main URL: https://www.dailymotion.com/video/x9v4s9g -o results.txt
    Main URL: https://www.dailymotion.com/video/x9v4s9g -s -md
    Main URL: cnn.com -a -d
    Main URL: -u 10.8.1.4:80/video/x9v4s9g -s -md

URL parsing:
    - By default, the first non-flag token is treated as the URL.
      If it does not start with a scheme, https:// is assumed.
      Example: "cnn.com" -> "https://cnn.com"
    - You can explicitly specify the URL with -u:
      Main URL: -u 10.8.1.4:80/video/x -s -md

HTML mode flags (default mode, no -n):
    -o <file>      Output results to a file (both modes)
    -s             Include SCRIPTS
    -md            Include MEDIA
    -a             Include API / ENDPOINTS
    -d             Include DOCUMENTS / CONFIG
    -ht            Include HTML / FRAMEWORK
    -O             Include OTHER
    --no-media     Flip category flags into EXCLUDES (what NOT to include)
    --full         Dump the full page like curl (no URL parsing, ignores categories and --search)

    Note: If no category flags are provided, all categories are included.
          With --no-media, any category flags become exclusions instead.

Network mode (DevTools-style network scraping):
    -n             Enable network mode
    Exactly one of:
        -t 30         Capture for 30 seconds
        -t 2m         Capture for 2 minutes
        -t 1m30s      Capture for 1 minute 30 seconds
        -t 90s        90 seconds
        --live        Capture live until Ctrl+C

    Network filtering flags (resource types):
        -fx           Fetch/XHR
        -d            Doc
        -css          CSS
        -js           JS
        -f            Font
        -img          Img
        -md           Media
        -mf           Manifest
        -s            Socket (WebSocket/EventSource)
        -wasm         Wasm
        -O            Other

    Notes:
        - Network mode drives a headless Chromium-based browser. It is looked up
          via --chromium, KNO_URL_CHROMIUM_PATH, the managed bundle directory
          (KNO_URL_BROWSERS_PATH) and finally google-chrome, chromium or
          chromium-browser on PATH.
        - If you mix -n with HTML-only flags (-a, -ht, --no-media), they are
          ignored and a warning is printed.

Search filter (applies to BOTH modes):
    --search <terms>
        Only include URLs whose string contains ANY of the given terms
        (case-insensitive substring match).

        Examples:
            --search mp4
            --search mp4,cdn
            --search api,v1,json

        This is combined with other filters (categories/types). URLs must match
        both the mode filters AND at least one search term.

Night Ops cleanup:
    --night-ops   Cleanup mechanic. Two modes:

                  1) Standalone immediate cleanup:
                     Main URL: --night-ops
                     - asks for confirmation
                     - attempts local cleanup of this tool's artifacts:
                       * delete the .kno-url state directories (local + user)
                       * delete the line history file
                       * conditionally delete the managed browser bundle if it
                         was installed AFTER the first valid network-mode
                         invocation in this directory (see below)
                       * attempt to delete this executable (where the OS permits)
                     - after cleanup, prints:
                       [+] Self-destruct complete. Exiting.
                     - then exits (no re-prompt).

                  2) Scheduled self-destruct with -sd when used alongside a URL:
                     Main URL: <url> [flags] --night-ops -sd <duration>
                     -sd <duration>  (e.g. 1h15m30s or "1h 15m 30s")
                     - no confirmation; runs the command, then sleeps for the
                       duration (Ctrl+C aborts), then runs the same cleanup as
                       above, prints:
                       [+] Self-destruct complete. Exiting.
                       and exits.

Browser tracking (network mode only):
    - On the first valid -n invocation (with -t or --live) for a state directory:
        - If a browser is present:
              .kno-url/browser_preexisting.flag
        - If no browser is present:
              .kno-url/browser_missing_at_start.flag

      (Invalid network usages like "nick.com -n" without -t/--live do NOT
       create any flags.)

    - An existing flag is never overwritten or recreated.

    - During --night-ops:
        - browser_preexisting.flag        -> the browser bundle is kept.
        - browser_missing_at_start.flag   -> the managed browser bundle is
                                             removed if it is present now.
        - All tracking files are then removed as part of cleanup.

    This is best-effort only and does not remove system logs, remote logs,
    or forensic traces outside these locations.

General:
    -h, --help    Show this help
"#;

pub fn help_text() -> &'static str {
    HELP_TEXT.trim()
}

pub fn print_help() {
    println!("{}", help_text());
}

pub fn print_banner() {
    println!("{}", BANNER.bright_white().bold());
}
