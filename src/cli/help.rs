use crate::terminal::{box_bottom, box_line, box_line_center, box_opt, box_top};

pub fn print_help() {
    box_top("xkpass");
    box_line_center("Memorable passwords from random words");
    box_line("");
    box_line("USAGE:");
    box_line("  xkpass [OPTIONS]");
    box_line("");
    box_line("OPTIONS:");
    box_line(" Password:");
    box_opt("  -p, --preset <NAME>", "Preset to start from (default: DEFAULT, see -l)");
    box_opt("  -c, --config <FILE>", "Read a full JSON configuration instead of a preset");
    box_opt("  -o, --overrides <JSON>", "JSON object of keys to change, e.g. '{\"num_words\":5}'");
    box_opt("  -n, --number <N>", "How many passwords to generate (default: 1)");
    box_line("");
    box_line(" Sources:");
    box_opt("  -d, --dictionary <FILE>", "Word list, one word per line. Lines starting with # are skipped.");
    box_opt("  -r, --rng <os|urandom>", "Random number source (default: os)");
    box_line("");
    box_line(" Entropy:");
    box_opt("  -s, --stats", "Show length and entropy statistics");
    box_opt("  -w, --warn <LEVEL>", "Entropy warnings: all, blind, seen or none");
    box_line("");
    box_line(" Output:");
    box_opt("  -b, --board", "Copy to clipboard instead of printing");
    box_opt("  -q, --quiet", "Only print passwords and errors");
    box_opt("      --verbose", "Log debug messages to stderr");
    box_line("");
    box_line(" Settings:");
    box_opt("      --save-default", "Remember the preset or configuration, dictionary, source and warnings for future runs");
    box_opt("  -l, --list-presets", "List presets, * marks the default");
    box_line("");
    box_line(" Info:");
    box_opt("  -h, --help", "Display this help message");
    box_opt("  -v, --version", "Display version");
    box_line("");
    box_line("EXAMPLES:");
    box_line("  xkpass                      One password from the default preset");
    box_line("  xkpass -p wifi -s           WPA2 key with statistics");
    box_line("  xkpass -p xkcd -n 5         Five XKCD style passwords");
    box_line("  xkpass -o '{\"num_words\":4}' Four words instead of three");
    box_line("  xkpass -p web32 --save-default");
    box_line("");
    box_line("Settings file: ~/.config/xkpass/settings.json");
    box_bottom();
}
