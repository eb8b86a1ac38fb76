// Test fixtures with known Gutenberg-style texts
// WHY: one small book exercising every pass keeps expectations readable

/// Wordlist in the on-disk format: `--` comments, `%` plural markers
pub const WORDLIST: &str = "-- test wordlist
a
and
at
but
came
door
he
home
it
night
of
said
she
the
then
to
was
went
wind%
";

/// Curly-quoted book with a name, a scanno, a hyphen pair, spacing defects
/// and one unclosed quotation.
pub const CURLY_BOOK: &str = "\u{FEFF}Morgan came home at night, hut the door was shut.
Morgan said nothing.

\u{201C}It was the wind,\u{201D} she said,then went to the door-way.

He stood at the door way and waited.

\u{201C}Come in, she said.
";

/// Straight-quoted book; the nesting check is skipped for it.
pub const STRAIGHT_BOOK: &str = "\"It was the wind,\" she said.\r\n\r\nThen he went home.\r\n";

/// Book using both quote families.
pub const MIXED_BOOK: &str = "\u{201C}It was the wind,\u{201D} she said.\n\n\"Then he went home.\"\n";
