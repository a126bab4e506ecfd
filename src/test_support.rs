use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::dataset::{Dataset, Listing};

pub const TARGET_COUNTRY: &'static str = "United States";

pub const SAMPLE_CSV: &'static str = "\
id,NAME,host id,host_identity_verified,host name,neighbourhood group,neighbourhood,lat,long,country,country code,instant_bookable,cancellation_policy,room type,Construction year,price,service fee,minimum nights,number of reviews,last review,reviews per month,review rate number,calculated host listings count,availability 365,house_rules,license
1001254,Clean & quiet apt home by the park,80014485718,unconfirmed,Madaline,Brooklyn,Kensington,40.64749,-73.97237,United States,US,False,strict,Private room,2020,\"$966 \",\"$193 \",10,9,10/19/2021,0.21,4,6,286,,
1002102,Skylit Midtown Castle,52335172823,verified,Jenna,Manhattan,Midtown,40.75362,-73.98377,United States,US,False,moderate,Entire home/apt,2007,\"$142 \",\"$28 \",30,45,5/21/2022,0.38,4,2,228,,
1002403,THE VILLAGE OF HARLEM,78829239556,,Elise,brookln,Bedford-Stuyvesant,40.68514,-73.95976,United States,US,True,flexible,Private room,2005,\"$1,060 \",,3,0,,,5,1,352,,
1002755,Entire Apt: Spacious Studio,85098326012,unconfirmed,Garry,manhatan,East Harlem,40.79851,-73.94399,United States,US,True,moderate,Entire home/apt,2005,\"$368 \",\"$74 \",30,270,7/5/2019,4.64,4,1,322,,
1003689,Lakeside cabin,45498551794,verified,Jenny,Queens,Astoria,43.65,-79.38,Canada,CA,False,moderate,Entire home/apt,2009,\"$200 \",\"$40 \",2,1,,,3,1,0,,
1004098,Large Cozy 1 BR Apartment,45498551794,verified,Michelle,,Harlem,40.80316,-73.9553,United States,US,False,flexible,Entire home/apt,2009,\"$204 \",\"$41 \",2,1,,,3,1,289,,
1004650,BlissArtsSpace!,61300605564,,Alberta,Queens,Long Island City,40.74767,-73.94499,United States,US,False,moderate,Shared room,2015,\"$50 \",\"$10 \",45,49,10/5/2017,0.4,5,1,219,,
1005202,Cozy Clean Guest Room,90821839709,unconfirmed,Carol,Manhattan,Murray Hill,40.74767,-73.975,United States,US,False,strict,Private room,2010,,\"$28 \",1,10,,,4,1,374,,
1005754,Large Furnished Room Near B'way,79384379533,verified,Alberta,Manhattan,Hell's Kitchen,40.76489,-73.98493,United States,US,False,strict,Private room,2016,\"$1,200 \",\"$240 \",2,430,6/24/2019,3.47,3,1,0,,
";

pub fn listing(id: usize, borough: &str, price: f64) -> Listing {
    Listing {
        id,
        name: Some(format!("Listing {}", id)),
        host_id: None,
        host_identity_verified: Some("verified".to_string()),
        host_name: Some("Host".to_string()),
        borough: borough.to_string(),
        neighbourhood: None,
        lat: Some(40.7),
        long: Some(-73.9),
        room_type: Some("Private room".to_string()),
        price,
        service_fee: Some((price * 0.2).round()),
        minimum_nights: Some(1),
        number_of_reviews: Some(0),
        cancellation_policy: Some("moderate".to_string()),
    }
}

pub fn sample_dataset() -> Dataset {
    let listings = crate::csv_reader::read_listings(SAMPLE_CSV.as_bytes(), TARGET_COUNTRY).unwrap();
    Dataset::from_listings(listings).unwrap()
}

/// Whole-dollar prices in `[10, 1010]` spread over three boroughs and
/// two room types. Both domain ends are always present.
pub fn random_dataset(seed: u64, len: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let boroughs = ["Manhattan", "Brooklyn", "Queens"];
    let room_types = ["Private room", "Entire home/apt"];
    let mut listings: Vec<Listing> = (0..len)
        .map(|i| {
            let mut l = listing(i + 1, boroughs.choose(&mut rng).unwrap(), rng.gen_range(10..=1010) as f64);
            l.room_type = Some(room_types.choose(&mut rng).unwrap().to_string());
            l
        })
        .collect();
    listings.push(listing(len + 1, "Manhattan", 10.0));
    listings.push(listing(len + 2, "Brooklyn", 1010.0));
    Dataset::from_listings(listings).unwrap()
}
