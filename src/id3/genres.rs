// Genre table shared by ID3v1 and ID3v2

/// Genre names indexed by their numeric code
///
/// Codes 0-79 are the original ID3v1 list, the rest are the Winamp extensions.
pub const GENRES: [&str; 192] = [
    "Blues", "Classic Rock", "Country", "Dance", "Disco", "Funk", "Grunge", "Hip-Hop", "Jazz",
    "Metal", "New Age", "Oldies", "Other", "Pop", "R&B", "Rap", "Reggae", "Rock", "Techno",
    "Industrial", "Alternative", "Ska", "Death Metal", "Pranks", "Soundtrack", "Euro-Techno",
    "Ambient", "Trip-Hop", "Vocal", "Jazz & Funk", "Fusion", "Trance", "Classical",
    "Instrumental", "Acid", "House", "Game", "Sound Clip", "Gospel", "Noise",
    "Alternative Rock", "Bass", "Soul", "Punk", "Space", "Meditative", "Instrumental Pop",
    "Instrumental Rock", "Ethnic", "Gothic", "Darkwave", "Techno-Industrial", "Electronic",
    "Pop-Folk", "Eurodance", "Dream", "Southern Rock", "Comedy", "Cult", "Gangsta", "Top 40",
    "Christian Rap", "Pop/Funk", "Jungle", "Native US", "Cabaret", "New Wave", "Psychadelic",
    "Rave", "Showtunes", "Trailer", "Lo-Fi", "Tribal", "Acid Punk", "Acid Jazz", "Polka",
    "Retro", "Musical", "Rock 'n' Roll", "Hard Rock", "Folk", "Folk-Rock", "National Folk",
    "Swing", "Fast Fusion", "Bebop", "Latin", "Revival", "Celtic", "Bluegrass", "Avantgarde",
    "Gothic Rock", "Progressive Rock", "Psychedelic Rock", "Symphonic Rock", "Slow Rock",
    "Big Band", "Chorus", "Easy Listening", "Acoustic", "Humour", "Speech", "Chanson", "Opera",
    "Chamber Music", "Sonata", "Symphony", "Booty Bass", "Primus", "Porn Groove", "Satire",
    "Slow Jam", "Club", "Tango", "Samba", "Folklore", "Ballad", "Power Ballad", "Rhythmic Soul",
    "Freestyle", "Duet", "Punk Rock", "Drum Solo", "A capella", "Euro-House", "Dance Hall",
    "Goa", "Drum & Bass", "Club-House", "Hardcore Techno", "Terror", "Indie", "BritPop",
    "Negerpunk", "Polsk Punk", "Beat", "Christian Gangsta Rap", "Heavy Metal", "Black Metal",
    "Crossover", "Contemporary Christian", "Christian Rock", "Merengue", "Salsa",
    "Thrash Metal", "Anime", "Jpop", "Synthpop", "Abstract", "Art Rock", "Baroque", "Bhangra",
    "Big Beat", "Breakbeat", "Chillout", "Downtempo", "Dub", "EBM", "Eclectic", "Electro",
    "Electroclash", "Emo", "Experimental", "Garage", "Global", "IDM", "Illbient",
    "Industro-Goth", "Jam Band", "Krautrock", "Leftfield", "Lounge", "Math Rock",
    "New Romantic", "Nu-Breakz", "Post-Punk", "Post-Rock", "Psytrance", "Shoegaze",
    "Space Rock", "Trop Rock", "World Music", "Neoclassical", "Audiobook", "Audio Theatre",
    "Neue Deutsche Welle", "Podcast", "Indie Rock", "G-Funk", "Dubstep", "Garage Rock",
    "Psybient",
];

/// Look up a genre by its numeric code
pub fn genre_name(code: usize) -> Option<&'static str> {
    GENRES.get(code).copied()
}

/// Expand numeric genre references such as `(17)` or `(4)Eurodisco`
///
/// ID3v2.2 and 2.3 store genres as `(<code>)` references, optionally followed
/// or preceded by free text. The last reference in the string is replaced by
/// the genre name until nothing changes anymore; every pass removes one
/// reference, so the number of passes is bounded by the number of `(`.
/// References to codes outside the table are left as written. Finally `((`,
/// the escape for a literal parenthesis, is collapsed to `(`.
pub fn expand_genre(genre: &str) -> String {
    let mut genre = genre.to_string();
    let max_passes = genre.matches('(').count();

    for _ in 0..max_passes {
        let Some((prefix, code, suffix)) = last_reference(&genre) else {
            break;
        };
        let Some(name) = code.parse::<usize>().ok().and_then(genre_name) else {
            break;
        };

        let mut expanded = String::new();
        if !prefix.is_empty() {
            expanded.push_str(prefix.trim());
            expanded.push(' ');
        }
        expanded.push_str(name);
        if !suffix.is_empty() {
            expanded.push(' ');
            expanded.push_str(suffix);
        }

        if expanded == genre {
            break;
        }
        genre = expanded;
    }

    genre.replace("((", "(")
}

/// Find the last `(<digits>)` group not preceded by another `(`
///
/// Returns the text before the group, the digits, and the text after the
/// group with leading spaces removed.
fn last_reference(genre: &str) -> Option<(&str, &str, &str)> {
    let bytes = genre.as_bytes();
    let mut found = None;

    for (start, _) in genre.match_indices('(') {
        if start > 0 && bytes[start - 1] == b'(' {
            continue;
        }

        let rest = &genre[start + 1..];
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || rest.as_bytes().get(digits) != Some(&b')') {
            continue;
        }

        let suffix = rest[digits + 1..].trim_start_matches(' ');
        found = Some((&genre[..start], &rest[..digits], suffix));
    }

    found
}
