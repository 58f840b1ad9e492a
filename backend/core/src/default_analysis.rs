//! Landing-page analysis shown before any upload.
//!
//! Displayed alongside the bundled default image without calling an analyzer,
//! so the page has content on first load.

/// Analysis of the bundled default image (Fisherman's Bastion, Budapest).
pub const DEFAULT_ANALYSIS: &str = r#"## Location Analysis

### Location Identification
🌍 **Verdict: Fisherman's Bastion, Budapest, Hungary (98% confidence)**

This is the iconic Fisherman's Bastion (Halászbástya), a neo-Gothic and neo-Romanesque terrace located on the Buda side of Budapest, Hungary. The image shows its distinctive white stone architecture, turrets, and staircase with visitors exploring the site.

### Architectural & Historical Details

1. **Architectural Features:**
   - Neo-Romanesque stone terrace with decorative turrets and spires
   - Seven fairy tale-like turrets representing the seven Magyar tribes that settled in the Carpathian Basin in 895
   - Ornate balconies and arcaded walkways with exceptional views
   - Grand staircase leading to the main terrace
   - White limestone construction creating a distinctive appearance
   - Decorative archways and colonnades

2. **Historical Significance:**
   - Built between 1895 and 1902 as part of the millennial celebrations
   - Designed by architect Frigyes Schulek
   - Named after the guild of fishermen who defended this section of the city walls in the Middle Ages
   - Purely decorative rather than defensive, unlike the original medieval walls
   - Located adjacent to Matthias Church on Castle Hill
   - Survived World War II with minimal damage, unlike many Budapest structures
   - Underwent major renovation in the 1980s and continues to be meticulously maintained

3. **Cultural Context:**
   - One of Budapest's most visited landmarks and a symbol of the city
   - Featured in numerous films, travel shows, and photography collections
   - Represents Hungary's national identity and historical pride
   - Part of the Budapest World Heritage Site
   - Popular destination for both tourists and locals
   - Frequently used as a backdrop for wedding photography and special events
   - Offers panoramic views of the Danube River and the Pest side of the city

### Geographic Information

1. **Exact Location:**
   - **Coordinates:** 47.5022° N, 19.0347° E
   - **Address:** Szentháromság tér, 1014 Budapest, Hungary
   - Located on Castle Hill in the Buda side of Budapest
   - Part of the historic Castle District (Várnegyed)
   - Situated adjacent to Matthias Church (Mátyás-templom)
   - Accessible via Fisherman's Bastion Square (Halászbástya tér)
   - Overlooking the Danube River with views of the Hungarian Parliament Building

2. **Getting There:**
   - Accessible by Bus 16 from Széll Kálmán tér (M2 metro)
   - Castle Bus (Várbusz) from Clark Ádám tér
   - Funicular railway (Budavári Sikló) from Chain Bridge
   - Ten-minute uphill walk from Batthyány tér (M2 metro)
   - Taxi or rideshare to Castle Hill
   - Castle Hill has limited vehicle access; public transportation recommended

### Visitor Information

1. **Best Times to Visit:**
   - **Seasonal Recommendations:**
     - Spring (April-May): Comfortable temperatures and fewer crowds
     - Early summer mornings (June): Before tour groups arrive
     - Fall (September-October): Beautiful autumn colors and pleasant weather
     - Winter (December): Potential for snow-covered views and Christmas markets nearby
   
   - **Time of Day:**
     - Sunrise: For photographers and empty terraces
     - Early morning (7-9am): Few tourists and golden morning light
     - Sunset and evening: Magical views of illuminated Budapest
     - Avoid midday (11am-4pm) during summer peak season due to crowds

2. **Practical Details:**
   - **Opening Hours:** Open 24 hours daily
   - **Upper Towers Entry Fee:** 
     - Adults: ~1000 HUF (~$3.50 USD)
     - Free access to the main terraces and lower walkways
     - Budapest Card holders: Free entry to upper towers
   - **Photography:** No restrictions for personal photography
   - **Accessibility:** Elevators available for those with mobility issues
   - **Facilities:** Public restrooms, cafes, and souvenir shops on site
   - **Average Visit Duration:** 30-60 minutes
   - **Wi-Fi:** Available in some areas

3. **Insider Tips:**
   - The main terrace is free to visit, only the upper towers require payment
   - Visit early morning or late evening to avoid tour groups
   - The view is equally spectacular at night when Budapest is illuminated
   - The north turret offers the best panoramic photo opportunities
   - Consider having coffee at the Fisherman's Bastion Restaurant for the view
   - Combine with a visit to nearby Matthias Church (requires separate ticket)
   - Winter visits can be magical with potential snow and fewer tourists
   - Guided Castle District tours often include knowledgeable commentary

### Nearby Attractions

1. **Immediate Vicinity (Under 5 Minutes):**
   - **Matthias Church** (Mátyás-templom): Gothic-style church with distinctive colorful roof tiles
   - **Statue of St. Stephen**: Bronze equestrian statue of Hungary's first king
   - **Hospital in the Rock Nuclear Bunker Museum**: Underground hospital used during WWII
   - **Castle Hill Funicular** (Budavári Sikló): Historic cable car connecting the hill to the Chain Bridge
   - **Hungarian National Gallery**: Major art museum housed in Buda Castle

2. **Short Walking Distance (5-15 Minutes):**
   - **Buda Castle** (Royal Palace): Former royal residence now housing museums
   - **Sándor Palace**: Official residence of the President of Hungary
   - **Vienna Gate** (Bécsi kapu): Historic entrance to Castle Hill
   - **Labyrinth of Buda Castle**: Underground cave system (note: currently closed)
   - **Széchenyi National Library**: Historic library collection

3. **Extended Area (15-30 Minutes):**
   - **Chain Bridge** (Széchenyi lánchíd): Iconic suspension bridge crossing the Danube
   - **Gellért Hill and Citadella**: Offering another panoramic viewpoint
   - **Hungarian Parliament Building**: Visible from Fisherman's Bastion across the river
   - **St. Stephen's Basilica**: Neoclassical church with observation deck
   - **Great Market Hall** (Central Market Hall): Historic indoor market
   - **Széchenyi Thermal Bath**: Famous medicinal thermal bath complex

This magnificent neo-Romanesque terrace offers some of the most spectacular views in Budapest and stands as a testament to Hungarian history and architectural prowess. While primarily built as a viewing platform rather than for defense, Fisherman's Bastion has become one of the most photographed and visited landmarks in Hungary's capital."#;
